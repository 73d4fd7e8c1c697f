use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use crate::command::*;
use crate::config::{page_size_from, IndexConfig};
use crate::error::{ConfigError, Result, SessionError};
use crate::index::HashIndex;
use crate::report::{BuildReport, Lookup, LookupMethod, Output};
use crate::setup::{load_words, resolve_words_path};
use crate::storage::{table_scan, PageStore};

/// Everything one operator works with: the loaded words, their pages and the
/// index over them. Passed explicitly to every command.
#[derive(Debug)]
pub struct Session {
    config: IndexConfig,
    words: Option<Vec<String>>,
    source: Option<PathBuf>,
    store: PageStore,
    index: HashIndex,
}

impl Session {
    pub fn new(config: IndexConfig) -> Result<Self, ConfigError> {
        let index = HashIndex::new(config.bucket_fill())?;
        Ok(Self {
            config,
            words: None,
            source: None,
            store: PageStore::default(),
            index,
        })
    }

    /// Uses already loaded words instead of reading a file.
    pub fn with_words(mut self, words: Vec<String>) -> Self {
        self.words = Some(words);
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    async fn load(&mut self, path: Option<PathBuf>) -> Result<Output> {
        let path = match path {
            Some(path) => path,
            None => resolve_words_path(&self.config).await?,
        };
        let words = load_words(&path).await?;
        let records = words.len();
        self.words = Some(words);
        self.source = Some(path.clone());
        Ok(Output::Loaded { path, records })
    }

    async fn build(&mut self, page_size: Option<i64>) -> Result<Output> {
        let page_size = match page_size {
            Some(size) => page_size_from(size)?,
            None => self.config.page_size(),
        };
        if self.words.is_none() && !self.index.is_built() {
            self.load(None).await?;
        }
        let mut index = HashIndex::new(self.config.bucket_fill())?;

        // Newly loaded words are paged as read; otherwise the records of the
        // current pages are split again at the new size.
        let records = match self.words.take() {
            Some(words) => words,
            None => std::mem::take(&mut self.store).into_records(),
        };
        let store = PageStore::new(records, page_size)?;
        index.build(store.pages());
        let report = BuildReport::new(self.source.clone(), &store, index.stats());
        info!(
            pages = store.page_count(),
            buckets = index.bucket_count(),
            "index rebuilt"
        );
        self.store = store;
        self.index = index;
        Ok(Output::Built(report))
    }

    fn ready_for_lookup(&self, key: &str) -> Result<(), SessionError> {
        if key.is_empty() {
            warn!("lookup with an empty key");
            return Err(SessionError::EmptyKey);
        }
        if !self.index.is_built() {
            warn!("lookup before the index was built");
            return Err(SessionError::NotBuilt);
        }
        Ok(())
    }

    fn find(&self, key: String) -> Result<Output> {
        self.ready_for_lookup(&key)?;
        let start = Instant::now();
        let page = self.index.find_page(&key);
        let elapsed = start.elapsed();
        Ok(Output::Lookup(Lookup {
            method: LookupMethod::Index,
            key,
            page,
            // a hit reads the one page the index points at
            pages_read: usize::from(page.is_some()),
            elapsed,
        }))
    }

    fn scan(&self, key: String) -> Result<Output> {
        self.ready_for_lookup(&key)?;
        let start = Instant::now();
        let outcome = table_scan(self.store.pages(), &key);
        let elapsed = start.elapsed();
        Ok(Output::Lookup(Lookup {
            method: LookupMethod::Scan,
            key,
            page: outcome.page,
            pages_read: outcome.pages_examined,
            elapsed,
        }))
    }

    fn stats(&self) -> Result<Output> {
        if !self.index.is_built() {
            return Err(SessionError::NotBuilt.into());
        }
        Ok(Output::Stats(self.index.stats()))
    }
}

pub async fn execute_command(session: &mut Session, cmd: Command) -> Result<Output> {
    match cmd {
        Command::Load(LoadCommand(path)) => session.load(path).await,
        Command::Build(BuildCommand(page_size)) => session.build(page_size).await,
        Command::Find(FindCommand(key)) => session.find(key),
        Command::Scan(ScanCommand(key)) => session.scan(key),
        Command::Stats => session.stats(),
        Command::Exit => Ok(Output::Exit),
    }
}
