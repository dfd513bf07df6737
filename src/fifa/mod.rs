//! FIFA API resources, records and event taxonomy.

pub mod api_types;
pub mod cache;
pub mod cached_client;
pub mod client;
pub mod taxonomy;
pub mod types;

pub use cached_client::CachedFifaClient;
