// PuppetDB HTTP client
//
// Wraps `reqwest::Client` with endpoint construction and the optional
// development response cache. Bodies are returned raw; parsing them into
// fact records is the caller's business.

use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::query::FactName;
use crate::response_cache::ResponseCache;
use crate::transport::TransportConfig;

/// Read-only client for a single PuppetDB server.
pub struct PuppetDbClient {
    http: reqwest::Client,
    base_url: Url,
    response_cache: Option<ResponseCache>,
}

impl PuppetDbClient {
    /// Create a client for `host:port`, picking the scheme from the transport.
    pub fn new(host: &str, port: u16, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("{}://{host}:{port}", transport.scheme()))?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            response_cache: None,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            response_cache: None,
        }
    }

    /// Serve and persist responses through `cache` (development mode).
    pub fn with_response_cache(mut self, cache: ResponseCache) -> Self {
        self.response_cache = Some(cache);
        self
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the endpoint URL for a query path (which may carry a query string).
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// GET `path` and return the raw body.
    pub async fn fetch(&self, path: &str) -> Result<String, Error> {
        let url = self.endpoint(path)?;

        if let Some(ref cache) = self.response_cache {
            if let Some(body) = cache.load(&url).await? {
                return Ok(body);
            }
        }

        debug!("GET {}", url);
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        if let Some(ref cache) = self.response_cache {
            cache.store(&url, &body).await?;
        }

        Ok(body)
    }

    /// Raw body of the facts query for `fact`.
    pub async fn fact_values(&self, fact: FactName) -> Result<String, Error> {
        self.fetch(&fact.query_path()).await
    }
}
