// Service exports
pub mod cache;
pub mod fetcher;

pub use cache::{CacheManager, CacheKey, CacheError};
pub use fetcher::{PageFetcher, FetchedPage, FetchError};
