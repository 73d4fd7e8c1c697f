//! Static hash index over paged records, with a table scan to compare
//! lookup costs against.
//!
//! Records are split into fixed size pages ([`storage`]). The index
//! ([`index`]) hashes every record key into one of `ceil(NR / FR) + 1`
//! buckets of capacity FR, chaining overflow buckets when a bucket fills, and
//! counts how often keys collide or overflow. The rest of the crate is the
//! shell that loads a word list and drives the index from commands.

pub mod bucket;
pub mod command;
pub mod config;
pub mod consts;
pub mod error;
pub mod execute;
pub mod hash;
pub mod index;
pub mod parse;
pub mod repl;
pub mod report;
pub mod setup;
pub mod stdin;
pub mod storage;


pub use bucket::{BucketEntry, BucketNode};
pub use config::IndexConfig;
pub use error::{ConfigError, Error};
pub use execute::{execute_command, Session};
pub use hash::bucket_of;
pub use index::{HashIndex, IndexStats};
pub use repl::*;
pub use setup::setup_session;
pub use stdin::*;
pub use storage::{table_scan, Page, PageStore, ScanOutcome};
