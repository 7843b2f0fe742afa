use crate::inventory::domain::{CatalogPage, PageRequest, SoftwareRecord};
use crate::ports::outbound::CatalogRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, RwLock};

/// CachingCatalogRepository wraps a CatalogRepository and memoizes reads.
///
/// This adapter implements the decorator pattern: the full listing and each
/// requested page are fetched once and served from memory afterwards.
/// Remote searches are passed through, since their results depend on the
/// service's current state. The cache is thread-safe.
pub struct CachingCatalogRepository<R: CatalogRepository> {
    inner: R,
    pages: Arc<DashMap<PageRequest, CatalogPage>>,
    listing: RwLock<Option<Vec<SoftwareRecord>>>,
}

impl<R: CatalogRepository> CachingCatalogRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pages: Arc::new(DashMap::new()),
            listing: RwLock::new(None),
        }
    }

    /// Returns the number of cached pages (for testing/monitoring)
    #[cfg(test)]
    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }
}

#[async_trait]
impl<R: CatalogRepository> CatalogRepository for CachingCatalogRepository<R> {
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>> {
        let cached = self
            .listing
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(records) = cached {
            return Ok(records);
        }

        let records = self.inner.fetch_all().await?;
        *self
            .listing
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(records.clone());
        Ok(records)
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage> {
        if let Some(cached) = self.pages.get(&request) {
            return Ok(cached.clone());
        }

        let page = self.inner.fetch_page(request).await?;
        self.pages.insert(request, page.clone());
        Ok(page)
    }

    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        self.inner.search_remote(keyword).await
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
