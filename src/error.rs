//! Error types for the index core and the command shell around it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected configuration. Raised where the bad value is supplied, never clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Page capacity must be a positive number of records.
    #[error("page size must be an integer > 0, got {0}")]
    InvalidPageSize(i64),
    /// Bucket fill capacity (FR) must be a positive number of entries.
    #[error("bucket fill capacity must be an integer > 0, got {0}")]
    InvalidBucketFill(i64),
}

/// Failure loading a word list.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read.
    #[error("reading {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: io::Error,
    },
    /// None of the known word list locations exist.
    #[error("no word list found in {0}; place words_alpha.txt there or pass a path")]
    NotFound(PathBuf),
}

/// Malformed command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("invalid escaped character: {0}")]
    InvalidEscape(char),
    #[error("unterminated literal: {0}")]
    UnterminatedLiteral(String),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expected keyword LOAD, BUILD, FIND, SCAN, STATS or EXIT")]
    ExpectedKeyword,
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("unexpected token after {0}")]
    TrailingToken(&'static str),
}

/// Operation refused in the current session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("enter a key to search for")]
    EmptyKey,
    #[error("build the index first")]
    NotBuilt,
}

/// Top level error of the shell.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
