use crate::error::ConfigError;

/// A fixed slice of records. Ids count up from 0 in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: usize,
    records: Vec<String>,
}

impl Page {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|record| record == key)
    }
}

/// Records split into pages of `page_size`. Read only once built.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    page_size: usize,
    pages: Vec<Page>,
}

impl PageStore {
    /// Splits `records` into consecutive pages of `page_size`; only the last
    /// page may be short. No records gives no pages.
    pub fn new(records: Vec<String>, page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize(0));
        }
        let mut pages = Vec::with_capacity(records.len().div_ceil(page_size));
        let mut records = records.into_iter().peekable();
        while records.peek().is_some() {
            let chunk: Vec<String> = records.by_ref().take(page_size).collect();
            pages.push(Page {
                id: pages.len(),
                records: chunk,
            });
        }
        Ok(Self { page_size, pages })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total records across all pages (NR).
    pub fn record_count(&self) -> usize {
        self.pages.iter().map(|page| page.records.len()).sum()
    }

    /// Gives the records back in page order, consuming the store.
    pub fn into_records(self) -> Vec<String> {
        self.pages.into_iter().flat_map(|page| page.records).collect()
    }

    pub fn first(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn last(&self) -> Option<&Page> {
        self.pages.last()
    }
}

/// Result of an unindexed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Page holding the key, if any.
    pub page: Option<usize>,
    /// Pages read before stopping.
    pub pages_examined: usize,
}

/// Reads pages in order until one contains `key`.
///
/// Cost is counted in pages read, not records compared: every page is
/// counted before it is searched, so a miss costs the whole store.
pub fn table_scan(pages: &[Page], key: &str) -> ScanOutcome {
    let mut pages_examined = 0;
    for page in pages {
        pages_examined += 1;
        if page.contains(key) {
            return ScanOutcome {
                page: Some(page.id),
                pages_examined,
            };
        }
    }
    ScanOutcome {
        page: None,
        pages_examined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fruit() -> Vec<String> {
        ["apple", "banana", "cherry", "date", "egg", "fig", "grape"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn splits_into_pages() {
        let store = PageStore::new(fruit(), 3).unwrap();
        assert_eq!(store.page_count(), 3);
        assert_eq!(store.record_count(), 7);
        let sizes: Vec<usize> = store.pages().iter().map(|p| p.records().len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        let ids: Vec<usize> = store.pages().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(store.last().unwrap().records(), &["grape".to_string()]);
    }

    #[test]
    fn repaging_keeps_record_order() {
        let store = PageStore::new(fruit(), 3).unwrap();
        let store = PageStore::new(store.into_records(), 2).unwrap();
        assert_eq!(store.page_count(), 4);
        assert_eq!(store.pages()[1].records(), &["cherry".to_string(), "date".to_string()]);
        assert_eq!(store.into_records(), fruit());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let store = PageStore::new(vec![], 10).unwrap();
        assert_eq!(store.page_count(), 0);
        assert_eq!(store.record_count(), 0);
        assert!(store.first().is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            PageStore::new(fruit(), 0).unwrap_err(),
            ConfigError::InvalidPageSize(0)
        );
    }

    #[test]
    fn scan_costs_pages_read() {
        let store = PageStore::new(fruit(), 3).unwrap();
        assert_eq!(
            table_scan(store.pages(), "apple"),
            ScanOutcome { page: Some(0), pages_examined: 1 }
        );
        assert_eq!(
            table_scan(store.pages(), "egg"),
            ScanOutcome { page: Some(1), pages_examined: 2 }
        );
        // only in the last page
        assert_eq!(
            table_scan(store.pages(), "grape"),
            ScanOutcome { page: Some(2), pages_examined: 3 }
        );
        assert_eq!(
            table_scan(store.pages(), "kiwi"),
            ScanOutcome { page: None, pages_examined: 3 }
        );
    }

    #[test]
    fn scan_of_empty_store() {
        assert_eq!(
            table_scan(&[], "anything"),
            ScanOutcome { page: None, pages_examined: 0 }
        );
    }

    proptest! {
        #[test]
        fn pages_reassemble_input(
            records in prop::collection::vec("[a-z]{1,6}", 0..200),
            page_size in 1_usize..20,
        ) {
            let store = PageStore::new(records.clone(), page_size).unwrap();
            let joined: Vec<String> = store
                .pages()
                .iter()
                .flat_map(|p| p.records().iter().cloned())
                .collect();
            prop_assert_eq!(&joined, &records);
            prop_assert_eq!(&store.clone().into_records(), &records);
            prop_assert_eq!(store.record_count(), records.len());
            let count = store.page_count();
            for (i, page) in store.pages().iter().enumerate() {
                prop_assert_eq!(page.id(), i);
                if i + 1 < count {
                    prop_assert_eq!(page.records().len(), page_size);
                } else {
                    prop_assert!(!page.records().is_empty());
                    prop_assert!(page.records().len() <= page_size);
                }
            }
        }

        #[test]
        fn scan_cost_is_first_page_position(
            records in prop::collection::vec("[a-c]{1,3}", 1..60),
            page_size in 1_usize..8,
            key in "[a-c]{1,3}",
        ) {
            let store = PageStore::new(records, page_size).unwrap();
            let outcome = table_scan(store.pages(), &key);
            match store.pages().iter().position(|p| p.contains(&key)) {
                Some(pos) => {
                    prop_assert_eq!(outcome.page, Some(pos));
                    prop_assert_eq!(outcome.pages_examined, pos + 1);
                }
                None => {
                    prop_assert_eq!(outcome.page, None);
                    prop_assert_eq!(outcome.pages_examined, store.page_count());
                }
            }
        }
    }
}
