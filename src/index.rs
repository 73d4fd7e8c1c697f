//! Static hash index over a page store.
//!
//! The bucket count is fixed at build time from the record count and the
//! bucket fill capacity (FR): `NB = ceil(NR / FR) + 1`. Buckets never split;
//! keys that do not fit in their primary bucket go to overflow nodes chained
//! behind it.
use tracing::debug;
use uuid::Uuid;

use crate::bucket::BucketNode;
use crate::error::ConfigError;
use crate::hash::bucket_of;
use crate::storage::{Page, PageStore};

/// Bucket array of a static hash index, plus the collision and overflow
/// counts of the build that filled it.
#[derive(Debug)]
pub struct HashIndex {
    /// Capacity of every bucket node (FR).
    bucket_fill: usize,

    /// Primary buckets, one per hash value. Empty until the first build.
    buckets: Vec<BucketNode>,

    /// Keys inserted by the last build.
    insert_count: usize,

    /// Inserts whose primary bucket already held at least one entry.
    collision_count: usize,

    /// Inserts that landed in an overflow node.
    overflow_count: usize,

    /// Pages indexed by the last build.
    page_count: usize,

    /// Identifies the last build, so reports from different builds can be
    /// told apart.
    build_id: Option<Uuid>,
}

/// Snapshot of what a build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub build_id: Option<Uuid>,
    /// NR
    pub record_count: usize,
    pub page_count: usize,
    /// NB
    pub bucket_count: usize,
    /// FR
    pub bucket_fill: usize,
    pub insert_count: usize,
    pub collision_count: usize,
    pub overflow_count: usize,
    pub collision_rate: f64,
    pub overflow_rate: f64,
    /// Overflow nodes allocated across all buckets.
    pub overflow_nodes: usize,
    /// Nodes in the longest chain, primary included.
    pub longest_chain: usize,
}

/// `ceil(record_count / bucket_fill) + 1`, never zero.
pub fn bucket_count_for(record_count: usize, bucket_fill: usize) -> usize {
    record_count.div_ceil(bucket_fill) + 1
}

impl HashIndex {
    /// An index that has not been built yet. Every lookup misses until
    /// [`HashIndex::build`] is called.
    pub fn new(bucket_fill: usize) -> Result<Self, ConfigError> {
        if bucket_fill == 0 {
            return Err(ConfigError::InvalidBucketFill(0));
        }
        Ok(Self {
            bucket_fill,
            buckets: Vec::new(),
            insert_count: 0,
            collision_count: 0,
            overflow_count: 0,
            page_count: 0,
            build_id: None,
        })
    }

    /// Builds a fresh index over `store`.
    pub fn from_pages(bucket_fill: usize, store: &PageStore) -> Result<Self, ConfigError> {
        let mut index = Self::new(bucket_fill)?;
        index.build(store.pages());
        Ok(index)
    }

    /// Indexes every record of `pages`, replacing whatever a previous build
    /// left behind.
    ///
    /// Keys are inserted page by page in record order, so when a key appears
    /// more than once the earliest page wins on lookup.
    pub fn build(&mut self, pages: &[Page]) {
        let record_count: usize = pages.iter().map(|page| page.records().len()).sum();
        let bucket_count = bucket_count_for(record_count, self.bucket_fill);

        self.buckets = (0..bucket_count)
            .map(|_| BucketNode::new(self.bucket_fill))
            .collect();
        self.insert_count = 0;
        self.collision_count = 0;
        self.overflow_count = 0;
        self.page_count = pages.len();
        let build_id = Uuid::new_v4();
        self.build_id = Some(build_id);

        for page in pages {
            for key in page.records() {
                let primary = &mut self.buckets[bucket_of(key, bucket_count)];
                if !primary.is_empty() {
                    self.collision_count += 1;
                }
                if primary.insert(key.clone(), page.id()) {
                    self.overflow_count += 1;
                }
                self.insert_count += 1;
            }
        }

        debug!(
            %build_id,
            records = record_count,
            buckets = bucket_count,
            fill = self.bucket_fill,
            collisions = self.collision_count,
            overflows = self.overflow_count,
            "hash index built"
        );
    }

    /// Page holding `key`, or `None` if the key was never indexed or the
    /// index has not been built.
    pub fn find_page(&self, key: &str) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        self.buckets[bucket_of(key, self.buckets.len())].find(key)
    }

    pub fn is_built(&self) -> bool {
        !self.buckets.is_empty()
    }

    pub fn bucket_fill(&self) -> usize {
        self.bucket_fill
    }

    /// NB. Zero before the first build.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[BucketNode] {
        &self.buckets
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count
    }

    pub fn collision_count(&self) -> usize {
        self.collision_count
    }

    pub fn overflow_count(&self) -> usize {
        self.overflow_count
    }

    pub fn build_id(&self) -> Option<Uuid> {
        self.build_id
    }

    /// Percentage of inserts that found their primary bucket occupied.
    pub fn collision_rate(&self) -> f64 {
        percent(self.collision_count, self.insert_count)
    }

    /// Percentage of inserts placed in an overflow node.
    pub fn overflow_rate(&self) -> f64 {
        percent(self.overflow_count, self.insert_count)
    }

    pub fn stats(&self) -> IndexStats {
        let (overflow_nodes, longest_chain) =
            self.buckets.iter().fold((0, 0), |(nodes, longest), bucket| {
                let len = bucket.chain_len();
                (nodes + len - 1, longest.max(len))
            });
        IndexStats {
            build_id: self.build_id,
            record_count: self.insert_count,
            page_count: self.page_count,
            bucket_count: self.bucket_count(),
            bucket_fill: self.bucket_fill,
            insert_count: self.insert_count,
            collision_count: self.collision_count,
            overflow_count: self.overflow_count,
            collision_rate: self.collision_rate(),
            overflow_rate: self.overflow_rate(),
            overflow_nodes,
            longest_chain,
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
