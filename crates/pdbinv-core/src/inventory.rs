//! Ansible dynamic-inventory document.
//!
//! Serializes as
//! `{"all":{"hosts":[...]},"_meta":{"hostvars":{"<fqdn>":{"ipaddress":"..."}}}}`.
//! Hosts are keyed by fqdn, not certname.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::CoreError;
use crate::model::NodeMap;

/// Variables attached to one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipaddress: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllGroup {
    pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub hostvars: IndexMap<String, HostVars>,
}

/// The full inventory document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub all: AllGroup,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

impl Inventory {
    /// Build the inventory from joined nodes, in node order.
    ///
    /// Nodes without an fqdn have no host name and are left out. A repeated
    /// fqdn is listed once and carries the variables of its last node.
    pub fn build(nodes: &NodeMap) -> Self {
        let mut hostvars: IndexMap<String, HostVars> = IndexMap::with_capacity(nodes.len());

        for node in nodes.iter() {
            let Some(ref fqdn) = node.fqdn else {
                debug!(certname = %node.certname, "node has no fqdn, leaving it out");
                continue;
            };
            hostvars.insert(
                fqdn.clone(),
                HostVars {
                    ipaddress: node.ipaddress.clone(),
                },
            );
        }

        Self {
            all: AllGroup {
                hosts: hostvars.keys().cloned().collect(),
            },
            meta: Meta { hostvars },
        }
    }

    pub fn hosts(&self) -> &[String] {
        &self.all.hosts
    }

    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(host)
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::Internal(e.to_string()))
    }
}
