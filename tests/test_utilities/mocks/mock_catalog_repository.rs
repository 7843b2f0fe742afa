use async_trait::async_trait;
use softkeeper::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock CatalogRepository serving a fixed listing
#[derive(Clone)]
pub struct MockCatalogRepository {
    records: Vec<SoftwareRecord>,
    should_fail: bool,
    fetch_all_calls: Arc<AtomicUsize>,
}

impl MockCatalogRepository {
    pub fn new(records: Vec<SoftwareRecord>) -> Self {
        Self {
            records,
            should_fail: false,
            fetch_all_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A catalog whose every request fails
    pub fn unreachable() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("catalog service unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>> {
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.records.clone())
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage> {
        self.check()?;
        Ok(CatalogPage::from_listing(&self.records, request))
    }

    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        self.check()?;
        let keyword = keyword.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&keyword))
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        "mock catalog".to_string()
    }
}
