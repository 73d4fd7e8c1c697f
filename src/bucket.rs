//! Fixed capacity hash buckets with overflow chaining.
//!
//! A bucket is a primary node holding up to `capacity` entries. When it fills,
//! further entries go to an overflow node of the same capacity, linked from the
//! full node, and so on down the chain. Nodes own their successor only, there
//! are no back links.

/// A `(key, page_id)` pair recording which page a key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    pub key: String,
    pub page_id: usize,
}

/// One node of a bucket chain. The head of the chain is the primary bucket.
#[derive(Debug)]
pub struct BucketNode {
    /// Maximum entries held by this node (and every node chained after it).
    capacity: usize,

    /// Entries in insertion order, never more than `capacity`.
    entries: Vec<BucketEntry>,

    /// Next node, allocated the first time an insert finds this node full.
    overflow: Option<Box<BucketNode>>,
}

impl BucketNode {
    /// Panics if `capacity` is zero; such a node could never accept an entry.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "bucket capacity must be positive");
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            overflow: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries stored in this node only, overflow excluded.
    pub fn entries(&self) -> &[BucketEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn overflow(&self) -> Option<&BucketNode> {
        self.overflow.as_deref()
    }

    /// Appends the entry to the first node of the chain with room, allocating
    /// an overflow node when the last one is full.
    ///
    /// Returns true if the entry landed in an overflow node, false if it went
    /// into this (primary) node.
    pub fn insert(&mut self, key: String, page_id: usize) -> bool {
        let capacity = self.capacity;
        let mut node = self;
        let mut depth = 0_usize;
        loop {
            if node.entries.len() < node.capacity {
                node.entries.push(BucketEntry { key, page_id });
                return depth > 0;
            }
            node = &mut **node
                .overflow
                .get_or_insert_with(|| Box::new(BucketNode::new(capacity)));
            depth += 1;
        }
    }

    /// Page id of the first entry matching `key`, searching nodes in chain
    /// order and entries in insertion order.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.page_id)
    }

    /// Iterates every entry in the chain.
    pub fn iter(&self) -> BucketIter<'_> {
        BucketIter {
            node: Some(self),
            pos: 0,
        }
    }

    /// Total entries across the chain.
    pub fn len(&self) -> usize {
        self.nodes().map(|node| node.entries.len()).sum()
    }

    /// Number of nodes in the chain, the primary included.
    pub fn chain_len(&self) -> usize {
        self.nodes().count()
    }

    fn nodes(&self) -> impl Iterator<Item = &BucketNode> {
        std::iter::successors(Some(self), |node| node.overflow.as_deref())
    }
}

impl Drop for BucketNode {
    // Unlink the chain one node at a time so long chains don't recurse.
    fn drop(&mut self) {
        let mut next = self.overflow.take();
        while let Some(mut node) = next {
            next = node.overflow.take();
        }
    }
}

/// Iterates the entries of a bucket, following overflow links.
pub struct BucketIter<'a> {
    node: Option<&'a BucketNode>,
    pos: usize,
}

impl<'a> Iterator for BucketIter<'a> {
    type Item = &'a BucketEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.node?;
            if let Some(entry) = node.entries.get(self.pos) {
                self.pos += 1;
                return Some(entry);
            }
            self.node = node.overflow.as_deref();
            self.pos = 0;
        }
    }
}
