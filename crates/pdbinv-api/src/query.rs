// PuppetDB v4 fact query paths.

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Root of the PuppetDB v4 query API.
pub const QUERY_ROOT: &str = "/pdb/query/v4";

/// The facts the inventory is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FactName {
    Fqdn,
    Ipaddress,
}

impl FactName {
    /// Query path returning every node's value for this fact,
    /// e.g. `/pdb/query/v4/facts/fqdn`.
    pub fn query_path(self) -> String {
        format!("{QUERY_ROOT}/facts/{self}")
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn query_paths() {
        assert_eq!(FactName::Fqdn.query_path(), "/pdb/query/v4/facts/fqdn");
        assert_eq!(
            FactName::Ipaddress.query_path(),
            "/pdb/query/v4/facts/ipaddress"
        );
    }

    #[test]
    fn names_round_trip_through_strings() {
        for fact in FactName::iter() {
            assert_eq!(fact.to_string().parse::<FactName>().ok(), Some(fact));
        }
    }
}
