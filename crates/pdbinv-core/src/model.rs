// ── Domain model ──
//
// Fact records as PuppetDB reports them, and the per-node records they are
// joined into.

use indexmap::IndexMap;
use serde::Serialize;

use pdbinv_api::FactName;

/// One fact value for one node, normalized from the upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRecord {
    pub certname: String,
    pub name: FactName,
    pub value: String,
}

impl FactRecord {
    pub fn new(certname: impl Into<String>, name: FactName, value: impl Into<String>) -> Self {
        Self {
            certname: certname.into(),
            name,
            value: value.into(),
        }
    }
}

/// Joined facts for one node. Either field may be missing when PuppetDB
/// only reported one of the two facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub certname: String,
    pub fqdn: Option<String>,
    pub ipaddress: Option<String>,
}

impl NodeRecord {
    pub fn new(certname: impl Into<String>) -> Self {
        Self {
            certname: certname.into(),
            ..Self::default()
        }
    }

    /// Set the field named by `fact`, replacing any earlier value.
    pub fn set(&mut self, fact: FactName, value: String) {
        match fact {
            FactName::Fqdn => self.fqdn = Some(value),
            FactName::Ipaddress => self.ipaddress = Some(value),
        }
    }
}

/// Nodes keyed by certname, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMap {
    nodes: IndexMap<String, NodeRecord>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `records` into the map. Unknown certnames get a fresh entry;
    /// a repeated (certname, fact) pair keeps the last value.
    pub fn merge<'a>(&mut self, records: impl IntoIterator<Item = &'a FactRecord>) {
        for record in records {
            self.nodes
                .entry(record.certname.clone())
                .or_insert_with(|| NodeRecord::new(record.certname.clone()))
                .set(record.name, record.value.clone());
        }
    }

    pub fn get(&self, certname: &str) -> Option<&NodeRecord> {
        self.nodes.get(certname)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }
}
