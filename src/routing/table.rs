//! Published routing table snapshots.

use std::fmt;

use crate::config::schema::RouteMap;

/// Identifies one backend pool: tenant path, API version and service name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub path: String,
    pub version: String,
    pub service: String,
}

impl RouteKey {
    pub fn new(
        path: impl Into<String>,
        version: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            service: service.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.path, self.version, self.service)
    }
}

/// An immutable snapshot of the routing data.
///
/// Never modified after construction; a reload builds a new table with the
/// next generation number and swaps it in whole.
#[derive(Debug, Default)]
pub struct RoutingTable {
    generation: u64,
    routes: RouteMap,
}

impl RoutingTable {
    pub fn new(generation: u64, routes: RouteMap) -> Self {
        Self { generation, routes }
    }

    /// Generation 0 is the placeholder published before the first load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raw descriptor for `key`, if one is configured.
    pub fn lookup(&self, key: &RouteKey) -> Option<&toml::Value> {
        self.routes
            .get(&key.path)?
            .get(&key.version)?
            .get(&key.service)
    }

    /// Number of configured (path, version, service) entries.
    pub fn route_count(&self) -> usize {
        self.routes
            .values()
            .flat_map(|versions| versions.values())
            .map(|services| services.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    fn table(doc: &str) -> RoutingTable {
        RoutingTable::new(1, parse_config(doc).unwrap().service)
    }

    #[test]
    fn test_lookup_walks_all_three_levels() {
        let table = table(
            r#"
            [service.tenantA.v1.svc]
            servers = ["http://h1"]

            [service.tenantA.v2.svc]
            servers = ["http://h2"]

            [service.tenantB.v1.other]
            servers = ["http://h3"]
            "#,
        );

        assert!(table.lookup(&RouteKey::new("tenantA", "v1", "svc")).is_some());
        assert!(table.lookup(&RouteKey::new("tenantA", "v2", "svc")).is_some());
        assert!(table.lookup(&RouteKey::new("tenantA", "v3", "svc")).is_none());
        assert!(table.lookup(&RouteKey::new("tenantB", "v1", "svc")).is_none());
        assert!(table.lookup(&RouteKey::new("tenantX", "v1", "svc")).is_none());
        assert_eq!(table.route_count(), 3);
    }

    #[test]
    fn test_default_table_is_empty() {
        let table = RoutingTable::default();
        assert_eq!(table.generation(), 0);
        assert_eq!(table.route_count(), 0);
    }

    #[test]
    fn test_route_key_display() {
        assert_eq!(RouteKey::new("a", "v1", "s").to_string(), "a/v1/s");
    }
}
