//! Session configuration: page size, bucket fill and where the word list lives.

use crate::consts::{DEFAULT_BUCKET_FILL, DEFAULT_PAGE_SIZE};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Configuration for a session. Setters validate as values come in so a bad
/// page size or bucket fill is reported where it was supplied.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub(crate) page_size: usize,
    pub(crate) bucket_fill: usize,
    pub(crate) words_path: Option<PathBuf>,
    pub(crate) base_dir: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexConfig {
    /// Create a new config with FR 8, 100 records per page and the current
    /// directory searched for a word list.
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            bucket_fill: DEFAULT_BUCKET_FILL,
            words_path: None,
            base_dir: PathBuf::from("."),
        }
    }

    /// Records per page used by BUILD when it is not given a size.
    pub fn set_page_size(mut self, page_size: i64) -> Result<Self, ConfigError> {
        self.page_size = page_size_from(page_size)?;
        Ok(self)
    }

    /// Set the bucket fill capacity (FR).
    pub fn set_bucket_fill(mut self, bucket_fill: i64) -> Result<Self, ConfigError> {
        self.bucket_fill = match usize::try_from(bucket_fill) {
            Ok(fill) if fill > 0 => fill,
            _ => return Err(ConfigError::InvalidBucketFill(bucket_fill)),
        };
        Ok(self)
    }

    /// Word list loaded when LOAD or BUILD is not given a path.
    pub fn set_words_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.words_path = Some(path.into());
        self
    }

    /// Directory searched for a word list when no path is set.
    pub fn set_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn bucket_fill(&self) -> usize {
        self.bucket_fill
    }

    pub fn words_path(&self) -> Option<&Path> {
        self.words_path.as_deref()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Validates a page size typed by an operator.
pub fn page_size_from(page_size: i64) -> Result<usize, ConfigError> {
    match usize::try_from(page_size) {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidPageSize(page_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IndexConfig::new();
        assert_eq!(config.page_size(), 100);
        assert_eq!(config.bucket_fill(), 8);
        assert!(config.words_path().is_none());
        assert_eq!(config.base_dir(), Path::new("."));
    }

    #[test]
    fn setters_validate() {
        let config = IndexConfig::new()
            .set_page_size(3)
            .unwrap()
            .set_bucket_fill(2)
            .unwrap()
            .set_words_path("words.txt");
        assert_eq!(config.page_size(), 3);
        assert_eq!(config.bucket_fill(), 2);
        assert_eq!(config.words_path(), Some(Path::new("words.txt")));

        assert_eq!(
            IndexConfig::new().set_page_size(0).unwrap_err(),
            ConfigError::InvalidPageSize(0)
        );
        assert_eq!(
            IndexConfig::new().set_page_size(-4).unwrap_err(),
            ConfigError::InvalidPageSize(-4)
        );
        assert_eq!(
            IndexConfig::new().set_bucket_fill(-1).unwrap_err(),
            ConfigError::InvalidBucketFill(-1)
        );
    }
}
