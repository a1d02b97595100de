//! Atomic gateway bootstrap
//!
//! Runs the whole establishment sequence in order — resolve peer, resolve
//! user, build identity, build signer, dial, open — and returns either a
//! fully populated [`GatewaySession`] or the first error. No stage is
//! retried, no partial state escapes: a failed bootstrap leaves nothing
//! behind for callers to misuse.

use tracing::{debug, info};

use crate::channel::{self, TlsPinPolicy};
use crate::error::Result;
use crate::identity::{build_identity, build_signer};
use crate::profile::{resolve_peer, resolve_user, NetworkConfig};
use crate::session::{GatewaySession, TimeoutPolicy};

/// Bootstrap a gateway session from a loaded network profile.
///
/// Absent configuration is handled by the caller (no profile means ledger
/// integration is disabled, not an error); this function assumes a profile
/// exists and fails loudly on the first bad stage.
pub fn bootstrap(config: &NetworkConfig, msp_id: &str, user: &str) -> Result<GatewaySession> {
    debug!(msp_id, user, "Bootstrap: resolving profile");
    let peer = resolve_peer(config, msp_id)?;
    let credential = resolve_user(config, msp_id, user)?;

    debug!(peer = %peer.name, "Bootstrap: building identity");
    let identity = build_identity(msp_id, &credential.certificate_pem)?;
    let signer = build_signer(&credential.private_key_pem)?;

    debug!(endpoint = %peer.endpoint, "Bootstrap: dialing peer");
    let channel = channel::dial(&peer.endpoint, &peer.ca_cert_pem, &TlsPinPolicy::default())?;

    let session = GatewaySession::open(identity, signer, channel, TimeoutPolicy::default());
    info!(
        msp_id,
        user,
        peer = %peer.name,
        endpoint = %session.peer_endpoint(),
        "Gateway session ready"
    );
    Ok(session)
}
