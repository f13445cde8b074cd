// ── Inventory service ──
//
// Owns one PuppetDB client per configured server and the injected cache.
// Servers are queried one after another in configuration order; the first
// failure aborts the run.

use tracing::{debug, info, warn};

use pdbinv_api::{FactName, PuppetDbClient, ResponseCache};

use crate::cache::InventoryCache;
use crate::config::{PipelineConfig, RunMode, ServerConfig};
use crate::error::CoreError;
use crate::inventory::Inventory;
use crate::join::parse_facts;
use crate::model::NodeMap;

/// A PuppetDB server paired with its client.
struct Upstream {
    label: String,
    client: PuppetDbClient,
}

/// Produces the inventory document, going through the cache where one is
/// configured.
pub struct InventoryService<C> {
    upstreams: Vec<Upstream>,
    config: PipelineConfig,
    cache: C,
}

impl<C: InventoryCache> InventoryService<C> {
    /// Build clients for every configured server.
    pub fn new(config: PipelineConfig, cache: C) -> Result<Self, CoreError> {
        let response_cache = match config.mode {
            RunMode::Development => Some(ResponseCache::new(&config.response_cache_dir)),
            RunMode::Production => None,
        };

        let upstreams = config
            .servers
            .iter()
            .map(|server| {
                let client = build_client(server, response_cache.as_ref())?;
                Ok(Upstream {
                    label: server.label.clone(),
                    client,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self {
            upstreams,
            config,
            cache,
        })
    }

    /// Use pre-built clients, paired with `config.servers` by position.
    /// Fails unless there is exactly one client per server.
    pub fn with_clients(
        config: PipelineConfig,
        clients: Vec<PuppetDbClient>,
        cache: C,
    ) -> Result<Self, CoreError> {
        if clients.len() != config.servers.len() {
            return Err(CoreError::Internal(format!(
                "{} clients supplied for {} configured servers",
                clients.len(),
                config.servers.len()
            )));
        }

        let upstreams = config
            .servers
            .iter()
            .zip(clients)
            .map(|(server, client)| Upstream {
                label: server.label.clone(),
                client,
            })
            .collect();
        Ok(Self {
            upstreams,
            config,
            cache,
        })
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Query every server and join the results.
    pub async fn collect_nodes(&self) -> Result<NodeMap, CoreError> {
        let mut nodes = NodeMap::new();

        for upstream in &self.upstreams {
            debug!(server = %upstream.label, url = %upstream.client.base_url(), "querying facts");
            let fqdn_body = upstream.client.fact_values(FactName::Fqdn).await?;
            let ip_body = upstream.client.fact_values(FactName::Ipaddress).await?;

            let fqdn_facts = parse_facts(&fqdn_body, FactName::Fqdn)?;
            let ip_facts = parse_facts(&ip_body, FactName::Ipaddress)?;
            info!(
                server = %upstream.label,
                fqdn = fqdn_facts.len(),
                ipaddress = ip_facts.len(),
                "facts received"
            );

            nodes.merge(&fqdn_facts);
            nodes.merge(&ip_facts);
        }

        Ok(nodes)
    }

    /// Query upstream and render a fresh inventory, bypassing the cache.
    pub async fn generate(&self) -> Result<String, CoreError> {
        let nodes = self.collect_nodes().await?;
        let inventory = Inventory::build(&nodes);
        info!(
            nodes = nodes.len(),
            hosts = inventory.hosts().len(),
            "inventory built"
        );
        inventory.to_json()
    }

    /// The inventory, served from cache when present. A miss regenerates
    /// and stores it.
    pub async fn list(&self) -> Result<String, CoreError> {
        let key = &self.config.cache.key;
        if let Some(cached) = self.cache.get(key).await? {
            debug!(%key, "serving inventory from cache");
            return Ok(cached);
        }

        let document = self.generate().await?;
        self.cache
            .set(key, &document, self.config.cache.ttl)
            .await?;
        Ok(document)
    }

    /// Per-host variables. Always empty: hostvars ship inside `_meta`.
    #[allow(clippy::unused_self)]
    pub fn host(&self, host: &str) -> String {
        debug!(%host, "host variables are served through _meta");
        "{}".to_owned()
    }

    /// Drop the cached inventory.
    pub async fn clear(&self) -> Result<(), CoreError> {
        debug!(key = %self.config.cache.key, "clearing cached inventory");
        self.cache.delete(&self.config.cache.key).await
    }

    /// Regenerate and overwrite the cached inventory. Does nothing when no
    /// cache is configured.
    pub async fn build(&self) -> Result<(), CoreError> {
        if !self.cache.is_enabled() {
            warn!("inventory cache is disabled, nothing to build");
            return Ok(());
        }

        let document = self.generate().await?;
        self.cache
            .set(&self.config.cache.key, &document, self.config.cache.ttl)
            .await
    }
}

fn build_client(
    server: &ServerConfig,
    response_cache: Option<&ResponseCache>,
) -> Result<PuppetDbClient, CoreError> {
    let client = PuppetDbClient::new(&server.hostname, server.port, &server.transport())?;
    Ok(match response_cache {
        Some(cache) => client.with_response_cache(cache.clone()),
        None => client,
    })
}
