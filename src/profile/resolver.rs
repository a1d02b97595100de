//! Peer and user resolution from a network profile
//!
//! Resolution is a pure read over the loaded tree: pick one peer for the
//! organization, pull its endpoint and trust anchor, and pull the user's
//! certificate and private key. Any missing key surfaces the failing path;
//! nothing dials the network from here.

use tracing::debug;

use crate::error::{CredentialField, Result, WicketError};
use crate::profile::NetworkConfig;

/// One resolved peer: where to dial and which CA to trust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerDescriptor {
    pub name: String,
    /// `host:port`, TLS scheme prefix already stripped.
    pub endpoint: String,
    /// Trust-anchor certificate, byte-for-byte as stored in the profile.
    pub ca_cert_pem: Vec<u8>,
}

/// PEM certificate/private-key pair for one user of an organization.
#[derive(Debug, Clone)]
pub struct UserCredential {
    pub certificate_pem: Vec<u8>,
    pub private_key_pem: Vec<u8>,
}

/// Strategy for choosing one peer out of the organization's list.
///
/// The default reproduces first-listed selection with no failover; a
/// failover-capable selector can be substituted without touching resolution.
pub trait PeerSelector {
    fn select<'a>(&self, peers: &'a [String]) -> Option<&'a str>;
}

/// Deterministically takes the first listed peer.
pub struct FirstListed;

impl PeerSelector for FirstListed {
    fn select<'a>(&self, peers: &'a [String]) -> Option<&'a str> {
        peers.first().map(String::as_str)
    }
}

/// Resolve the organization's peer endpoint and trust anchor.
///
/// Looks up `organizations.<msp_id>.peers`, selects one name via
/// [`FirstListed`], then reads `peers.<name>.url` (stripping any `grpcs://`
/// prefix) and `peers.<name>.tlsCACerts.pem`.
pub fn resolve_peer(config: &NetworkConfig, msp_id: &str) -> Result<PeerDescriptor> {
    resolve_peer_with(config, msp_id, &FirstListed)
}

/// [`resolve_peer`] with an explicit selection strategy.
pub fn resolve_peer_with(
    config: &NetworkConfig,
    msp_id: &str,
    selector: &dyn PeerSelector,
) -> Result<PeerDescriptor> {
    let peers_path = format!("organizations.{msp_id}.peers");
    let peers = config.lookup_str_list(&peers_path)?;
    let name = selector
        .select(&peers)
        .ok_or_else(|| WicketError::ConfigLookup { path: peers_path })?
        .to_string();

    let url = config.lookup_str(&format!("peers.{name}.url"))?;
    let endpoint = url.replace("grpcs://", "");
    let ca_cert_pem = config
        .lookup_str(&format!("peers.{name}.tlsCACerts.pem"))?
        .as_bytes()
        .to_vec();

    debug!(peer = %name, endpoint = %endpoint, "Resolved peer");
    Ok(PeerDescriptor {
        name,
        endpoint,
        ca_cert_pem,
    })
}

/// Resolve one user's certificate and private key.
///
/// Fails with a distinct [`WicketError::CredentialMissing`] per absent field
/// so callers can tell a missing cert from a missing key.
pub fn resolve_user(config: &NetworkConfig, msp_id: &str, user: &str) -> Result<UserCredential> {
    let cert_path = format!("organizations.{msp_id}.users.{user}.cert.pem");
    let key_path = format!("organizations.{msp_id}.users.{user}.key.pem");

    let certificate_pem = config
        .lookup_str(&cert_path)
        .map_err(|_| WicketError::CredentialMissing {
            field: CredentialField::Cert,
            msp_id: msp_id.to_string(),
            user: user.to_string(),
        })?
        .as_bytes()
        .to_vec();

    let private_key_pem = config
        .lookup_str(&key_path)
        .map_err(|_| WicketError::CredentialMissing {
            field: CredentialField::Key,
            msp_id: msp_id.to_string(),
            user: user.to_string(),
        })?
        .as_bytes()
        .to_vec();

    debug!(msp_id, user, "Resolved user credential");
    Ok(UserCredential {
        certificate_pem,
        private_key_pem,
    })
}
