//! What commands hand back to the operator, and how it is printed.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::PREVIEW_RECORDS;
use crate::index::IndexStats;
use crate::storage::{Page, PageStore};

#[derive(Debug)]
pub enum Output {
    Loaded { path: PathBuf, records: usize },
    Built(BuildReport),
    Lookup(Lookup),
    Stats(IndexStats),
    Exit,
}

/// The first few records of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePreview {
    pub id: usize,
    pub records: Vec<String>,
    pub truncated: bool,
}

impl From<&Page> for PagePreview {
    fn from(page: &Page) -> Self {
        let records = page.records();
        Self {
            id: page.id(),
            records: records.iter().take(PREVIEW_RECORDS).cloned().collect(),
            truncated: records.len() > PREVIEW_RECORDS,
        }
    }
}

#[derive(Debug)]
pub struct BuildReport {
    pub source: Option<PathBuf>,
    pub stats: IndexStats,
    pub first: Option<PagePreview>,
    pub last: Option<PagePreview>,
}

impl BuildReport {
    pub fn new(source: Option<PathBuf>, store: &PageStore, stats: IndexStats) -> Self {
        Self {
            source,
            stats,
            first: store.first().map(PagePreview::from),
            last: store.last().map(PagePreview::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMethod {
    Index,
    Scan,
}

#[derive(Debug)]
pub struct Lookup {
    pub method: LookupMethod,
    pub key: String,
    pub page: Option<usize>,
    /// Page reads charged to the lookup.
    pub pages_read: usize,
    pub elapsed: Duration,
}

fn page_reads(n: usize) -> String {
    if n == 1 {
        "1 page read".to_string()
    } else {
        format!("{} page reads", n)
    }
}

impl fmt::Display for PagePreview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Page {}: {:?}{}",
            self.id,
            self.records,
            if self.truncated { " ..." } else { "" }
        )
    }
}

fn write_stats(f: &mut fmt::Formatter, stats: &IndexStats) -> fmt::Result {
    writeln!(f, "NR (records): {}", stats.record_count)?;
    writeln!(f, "Pages: {}", stats.page_count)?;
    writeln!(f, "FR (bucket capacity): {}", stats.bucket_fill)?;
    writeln!(f, "NB (buckets): {}", stats.bucket_count)?;
    if let Some(id) = stats.build_id {
        writeln!(f, "Build: {}", id)?;
    }
    writeln!(
        f,
        "Collisions: {} of {} inserts",
        stats.collision_count, stats.insert_count
    )?;
    writeln!(
        f,
        "Overflows: {} ({} overflow buckets, longest chain {})",
        stats.overflow_count, stats.overflow_nodes, stats.longest_chain
    )?;
    writeln!(f, "Collision rate: {:.2}%", stats.collision_rate)?;
    write!(f, "Overflow rate: {:.2}%", stats.overflow_rate)
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(source) = &self.source {
            writeln!(f, "Word list: {}", source.display())?;
        }
        if let (Some(first), Some(last)) = (&self.first, &self.last) {
            writeln!(f, "--- First page ---")?;
            writeln!(f, "{}", first)?;
            writeln!(f, "--- Last page ---")?;
            writeln!(f, "{}", last)?;
        }
        writeln!(f, "--- Statistics ---")?;
        write_stats(f, &self.stats)
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.method {
            LookupMethod::Index => writeln!(f, "=== Index lookup ===")?,
            LookupMethod::Scan => writeln!(f, "=== Table scan ===")?,
        }
        match self.page {
            Some(page) => write!(f, "Key '{}' found in page {}.", self.key, page)?,
            None => write!(f, "Key '{}' NOT found.", self.key)?,
        }
        write!(
            f,
            " Cost: {}. Time: {:.3} ms",
            page_reads(self.pages_read),
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Loaded { path, records } => {
                write!(f, "Loaded {} records from {}", records, path.display())
            }
            Output::Built(report) => write!(f, "{}", report),
            Output::Lookup(lookup) => write!(f, "{}", lookup),
            Output::Stats(stats) => write_stats(f, stats),
            Output::Exit => write!(f, "Goodbye!"),
        }
    }
}
