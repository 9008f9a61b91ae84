//! Static router name↔management-IP directory.
//!
//! The two sources name routers differently, so identity is resolved through
//! this table rather than compared as strings. The directory is built once
//! per run and injected into the engine; tests substitute small fixtures.

use std::collections::HashMap;

/// Sentinel returned by a forward lookup when the router name has no
/// directory entry. A string on purpose: it flows into the report's
/// "Router IP" column instead of aborting the run.
pub const UNKNOWN_ROUTER: &str = "router not found in directory";

/// Builtin backbone router table. Used when settings carry no override.
const BUILTIN_ROUTERS: [(&str, &str); 14] = [
    ("bb1.alm1", "217.196.30.129"),
    ("bb11.alm1", "95.141.143.133"),
    ("bb0.alm1", "95.141.143.132"),
    ("bb10.ast1", "217.196.24.10"),
    ("bb0.atr1", "217.196.16.4"),
    ("gw0.atr1", "217.196.16.14"),
    ("bb10.akb1", "95.141.142.17"),
    ("bb0.akt1", "217.196.20.2"),
    ("bb10.url2", "217.196.19.215"),
    ("gw0.url2", "217.196.19.214"),
    ("bb11.pvl1", "95.141.140.1"),
    ("bb11.krg1", "217.196.25.3"),
    ("bb10.shm1", "95.141.135.3"),
    ("bb10.akt1", "217.196.21.4"),
];

/// Immutable bidirectional router-name↔IP mapping.
///
/// Lookup semantics are deliberately asymmetric: forward (name→IP) misses
/// yield the [`UNKNOWN_ROUTER`] sentinel, reverse (IP→name) misses yield
/// `None`.
#[derive(Debug, Clone)]
pub struct RouterDirectory {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl RouterDirectory {
    /// Build a directory from (name, ip) pairs. On duplicate names or IPs
    /// the last pair wins, matching plain map insertion.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();
        for (name, ip) in pairs {
            let name = name.into();
            let ip = ip.into();
            forward.insert(name.clone(), ip.clone());
            reverse.insert(ip, name);
        }
        Self { forward, reverse }
    }

    /// The builtin backbone table.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_ROUTERS)
    }

    /// Forward lookup: router name → management IP, sentinel on miss.
    pub fn resolve(&self, name: &str) -> &str {
        self.forward.get(name).map_or(UNKNOWN_ROUTER, String::as_str)
    }

    /// Reverse lookup: management IP → router name, `None` on miss.
    pub fn reverse_lookup(&self, ip: &str) -> Option<&str> {
        self.reverse.get(ip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roundtrip() {
        let dir = RouterDirectory::builtin();
        assert_eq!(dir.len(), 14);
        for (name, ip) in BUILTIN_ROUTERS {
            assert_eq!(dir.resolve(name), ip);
            assert_eq!(dir.reverse_lookup(ip), Some(name));
            // reverse(forward(name)) == name and forward(reverse(ip)) == ip
            assert_eq!(dir.reverse_lookup(dir.resolve(name)), Some(name));
            assert_eq!(dir.resolve(dir.reverse_lookup(ip).unwrap()), ip);
        }
    }

    #[test]
    fn forward_miss_is_sentinel_not_error() {
        let dir = RouterDirectory::builtin();
        assert_eq!(dir.resolve("no-such-router"), UNKNOWN_ROUTER);
    }

    #[test]
    fn reverse_miss_is_none() {
        let dir = RouterDirectory::builtin();
        assert_eq!(dir.reverse_lookup("10.255.255.1"), None);
        // The sentinel itself never reverse-resolves
        assert_eq!(dir.reverse_lookup(UNKNOWN_ROUTER), None);
    }

    #[test]
    fn fixture_directory() {
        let dir = RouterDirectory::from_pairs([("bb1.test", "192.0.2.1")]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.resolve("bb1.test"), "192.0.2.1");
        assert_eq!(dir.reverse_lookup("192.0.2.1"), Some("bb1.test"));
    }
}
