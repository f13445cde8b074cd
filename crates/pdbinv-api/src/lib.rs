// pdbinv-api: Async client for the PuppetDB fact query API

pub mod client;
pub mod error;
pub mod query;
pub mod response_cache;
pub mod transport;

pub use client::PuppetDbClient;
pub use error::Error;
pub use query::FactName;
pub use response_cache::ResponseCache;
pub use transport::{ClientTls, TransportConfig};
