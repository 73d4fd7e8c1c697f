use crate::config::IndexConfig;
use crate::consts::WORDS_CANDIDATES;
use crate::error::{ConfigError, LoadError};
use crate::execute::Session;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Returns a session ready to take commands, checking the bucket fill
/// before anything is loaded.
pub fn setup_session(config: IndexConfig) -> Result<Session, ConfigError> {
    Session::new(config)
}

/// Finds the word list: the configured path if there is one, otherwise the
/// first of the known file names that exists under the base directory.
pub async fn resolve_words_path(config: &IndexConfig) -> Result<PathBuf, LoadError> {
    if let Some(path) = config.words_path() {
        return Ok(path.to_path_buf());
    }
    let base_dir = config.base_dir();
    for candidate in WORDS_CANDIDATES {
        let path = base_dir.join(candidate);
        debug!(path = %path.display(), "looking for word list");
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(path);
        }
    }
    Err(LoadError::NotFound(base_dir.to_path_buf()))
}

/// Reads a word list, one key per line.
pub async fn load_words(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let words = parse_words(&text);
    info!(path = %path.display(), records = words.len(), "word list loaded");
    Ok(words)
}

/// Trims each line and drops the blank ones.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
