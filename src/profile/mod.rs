//! Network connection profile
//!
//! A connection profile is a hierarchical key/value tree (YAML on disk; JSON
//! loads too since YAML is a superset) describing the organizations, peers,
//! and users of a permissioned ledger network. The tree is loaded once,
//! immutable afterwards, and queried by dotted path.
//!
//! Entry names frequently contain dots themselves (a peer may be called
//! `peer0.org1.example.com`), so path resolution at each mapping level tries
//! the longest joined prefix of the remaining segments before splitting
//! further.

pub mod resolver;

pub use resolver::{resolve_peer, resolve_user, FirstListed, PeerDescriptor, PeerSelector, UserCredential};

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{Result, WicketError};

/// Immutable hierarchical network configuration.
pub struct NetworkConfig {
    root: Value,
}

impl NetworkConfig {
    /// Load a profile from a YAML (or JSON) file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| WicketError::ConfigLookup {
            path: format!("{} ({})", path.display(), e),
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "Loaded network profile");
        Self::from_yaml_str(&raw)
    }

    /// Parse a profile from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(raw)
            .map_err(|e| WicketError::ConfigLookup {
                path: format!("<profile root>: {e}"),
            })?;
        Ok(Self { root })
    }

    /// Look up a dotted path, e.g. `organizations.Org1MSP.peers`.
    ///
    /// Returns the failing path verbatim in the error so callers can report
    /// exactly which key was absent.
    pub fn lookup(&self, path: &str) -> Result<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        resolve(&self.root, &segments).ok_or_else(|| WicketError::ConfigLookup {
            path: path.to_string(),
        })
    }

    /// Look up a dotted path expecting a string value.
    pub fn lookup_str(&self, path: &str) -> Result<&str> {
        self.lookup(path)?
            .as_str()
            .ok_or_else(|| WicketError::ConfigLookup {
                path: path.to_string(),
            })
    }

    /// Look up a dotted path expecting a list of strings.
    pub fn lookup_str_list(&self, path: &str) -> Result<Vec<String>> {
        let seq = self
            .lookup(path)?
            .as_sequence()
            .ok_or_else(|| WicketError::ConfigLookup {
                path: path.to_string(),
            })?;
        seq.iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| WicketError::ConfigLookup {
                        path: path.to_string(),
                    })
            })
            .collect()
    }

}

/// Walk the tree, preferring the longest joined key at each mapping level so
/// dotted entry names resolve before being split apart.
fn resolve<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    if segments.is_empty() {
        return Some(value);
    }
    let map = value.as_mapping()?;
    for take in (1..=segments.len()).rev() {
        let key = segments[..take].join(".");
        if let Some(child) = map.get(key.as_str()) {
            if let Some(found) = resolve(child, &segments[take..]) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
organizations:
  Org1MSP:
    peers:
      - peer0.org1.example.com
peers:
  peer0.org1.example.com:
    url: grpcs://localhost:7051
    tlsCACerts:
      pem: "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n"
"#;

    #[test]
    fn test_lookup_plain_path() {
        let cfg = NetworkConfig::from_yaml_str(PROFILE).unwrap();
        let peers = cfg.lookup_str_list("organizations.Org1MSP.peers").unwrap();
        assert_eq!(peers, vec!["peer0.org1.example.com"]);
    }

    #[test]
    fn test_lookup_dotted_entry_name() {
        let cfg = NetworkConfig::from_yaml_str(PROFILE).unwrap();
        let url = cfg.lookup_str("peers.peer0.org1.example.com.url").unwrap();
        assert_eq!(url, "grpcs://localhost:7051");
    }

    #[test]
    fn test_lookup_missing_reports_full_path() {
        let cfg = NetworkConfig::from_yaml_str(PROFILE).unwrap();
        let err = cfg.lookup("organizations.Org2MSP.peers").unwrap_err();
        match err {
            WicketError::ConfigLookup { path } => {
                assert_eq!(path, "organizations.Org2MSP.peers");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_profile_loads() {
        let cfg = NetworkConfig::from_yaml_str(r#"{"a": {"b": "c"}}"#).unwrap();
        assert_eq!(cfg.lookup_str("a.b").unwrap(), "c");
    }
}
