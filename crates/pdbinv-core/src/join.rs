//! Fact joining.
//!
//! PuppetDB answers each fact query with a flat array of
//! `{certname, name, value}` objects. [`parse_facts`] turns one such body
//! into [`FactRecord`]s carrying a semantic fact name, and [`join`] folds
//! the fqdn and ipaddress records into one [`NodeRecord`] per certname.
//!
//! [`NodeRecord`]: crate::model::NodeRecord

use serde::Deserialize;
use tracing::debug;

use pdbinv_api::FactName;

use crate::error::CoreError;
use crate::model::{FactRecord, NodeMap};

/// Wire shape of one element of a facts response.
#[derive(Debug, Deserialize)]
struct RawFact {
    certname: String,
    name: String,
    value: serde_json::Value,
}

/// Parse a facts response body, keeping only records for `expected`.
pub fn parse_facts(body: &str, expected: FactName) -> Result<Vec<FactRecord>, CoreError> {
    let raw: Vec<RawFact> =
        serde_json::from_str(body).map_err(|e| CoreError::MalformedResponse {
            fact: expected,
            message: e.to_string(),
        })?;

    let expected_name: &str = expected.as_ref();
    let records = raw
        .into_iter()
        .filter_map(|fact| {
            if fact.name != expected_name {
                debug!(
                    certname = %fact.certname,
                    name = %fact.name,
                    "skipping record for unexpected fact"
                );
                return None;
            }
            let value = match fact.value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            Some(FactRecord::new(fact.certname, expected, value))
        })
        .collect();

    Ok(records)
}

/// Join fqdn and ipaddress records on certname.
///
/// fqdn records seed the map; ipaddress records then fill in existing
/// entries or create new ones, so a node that only reported an address is
/// kept (with no fqdn).
pub fn join(fqdn_facts: &[FactRecord], ip_facts: &[FactRecord]) -> NodeMap {
    let mut nodes = NodeMap::new();
    nodes.merge(fqdn_facts);
    nodes.merge(ip_facts);
    nodes
}
