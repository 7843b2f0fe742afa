use crate::inventory::domain::{CatalogPage, PageRequest, SoftwareRecord};
use crate::ports::outbound::CatalogRepository;
use crate::shared::error::SoftkeeperError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const APPLICATION_ROUTE: &str = "api/Application";

/// HttpCatalogRepository adapter for the catalog web service
///
/// This adapter implements the CatalogRepository port over the service's
/// JSON API:
/// - `GET {base}/api/Application` for the full listing
/// - `GET {base}/api/Application/paged?PageIndex=&PageSize=` for one page
/// - `GET {base}/api/Application/search?keyword=` for server-side search
///
/// Requests are made once; failures are reported, never retried.
pub struct HttpCatalogRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogRepository {
    /// Creates a client for the service rooted at `base_url`
    ///
    /// # Errors
    /// Returns an error if the URL is not http(s) or the HTTP client
    /// cannot be built
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SoftkeeperError::Validation {
                message: format!(
                    "catalog URL must start with http:// or https://, got '{}'",
                    base_url
                ),
            }
            .into());
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("softkeeper/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self) -> String {
        format!("{}/{}", self.base_url, APPLICATION_ROUTE)
    }

    fn paged_url(&self, request: PageRequest) -> String {
        format!(
            "{}/{}/paged?PageIndex={}&PageSize={}",
            self.base_url,
            APPLICATION_ROUTE,
            request.page_index(),
            request.page_size()
        )
    }

    fn search_url(&self, keyword: &str) -> String {
        format!(
            "{}/{}/search?keyword={}",
            self.base_url,
            APPLICATION_ROUTE,
            urlencoding::encode(keyword)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "requesting catalog data");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SoftkeeperError::CatalogRequest {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SoftkeeperError::CatalogRequest {
                url: url.to_string(),
                details: format!("catalog service returned status code {}", status),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SoftkeeperError::CatalogRequest {
                url: url.to_string(),
                details: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| {
            SoftkeeperError::CatalogParse {
                source_name: url.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl CatalogRepository for HttpCatalogRepository {
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>> {
        self.get_json(&self.listing_url()).await
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage> {
        self.get_json(&self.paged_url(request)).await
    }

    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        self.get_json(&self.search_url(keyword)).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
