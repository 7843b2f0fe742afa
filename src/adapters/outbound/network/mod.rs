/// Network adapters for the catalog service
mod caching_catalog_client;
mod catalog_client;

pub use caching_catalog_client::CachingCatalogRepository;
pub use catalog_client::HttpCatalogRepository;
