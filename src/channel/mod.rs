//! Pinned-TLS secure channel
//!
//! Dials a peer endpoint over gRPC with client TLS that trusts exactly one
//! supplied CA certificate — no system roots. Connection establishment is
//! lazy (tonic defers it to first use); callers that want dial-time
//! verification use [`SecureChannel::probe`].
//!
//! Hostname verification is always on: the presented certificate must chain
//! to the pinned CA *and* match the effective server name, which is either
//! [`TlsPinPolicy::server_name`] or the endpoint host itself.

use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, info};
use x509_parser::prelude::{FromDer, X509Certificate};

use crate::error::{Result, WicketError};

/// Named trust policy: pin to a single CA, verify hostnames strictly.
#[derive(Debug, Clone, Default)]
pub struct TlsPinPolicy {
    /// TLS server name override. When absent the endpoint host is used.
    pub server_name: Option<String>,
}

/// An established (possibly still-connecting) transport handle bound to one
/// peer endpoint and one trusted CA.
#[derive(Debug)]
pub struct SecureChannel {
    endpoint: String,
    lazy: Channel,
    dialer: Endpoint,
}

impl SecureChannel {
    /// `host:port` this channel is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The multiplexed gRPC channel. Cloning is cheap; all clones share the
    /// underlying connection.
    pub fn grpc(&self) -> Channel {
        self.lazy.clone()
    }

    /// Eagerly verify that a connection can be established.
    ///
    /// Dial itself is lazy; this forces the TLS handshake now so failures are
    /// attributable to the channel rather than to a later application call.
    pub async fn probe(&self) -> Result<()> {
        self.dialer
            .connect()
            .await
            .map(drop)
            .map_err(|e| WicketError::ChannelEstablishment {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })
    }

    /// Release the underlying sockets and credentials.
    pub fn close(self) {
        debug!(endpoint = %self.endpoint, "Secure channel closed");
        drop(self);
    }
}

/// Build a single-CA-pinned TLS channel to `endpoint` (`host:port`).
///
/// The CA PEM is parsed up front — malformed input fails with
/// [`WicketError::CertParse`] before any transport work. The returned channel
/// connects lazily.
pub fn dial(endpoint: &str, ca_cert_pem: &[u8], policy: &TlsPinPolicy) -> Result<SecureChannel> {
    validate_ca_pem(ca_cert_pem)?;

    let mut tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(ca_cert_pem));
    if let Some(name) = &policy.server_name {
        tls = tls.domain_name(name.clone());
    }

    let uri = format!("https://{endpoint}");
    let dialer = Endpoint::from_shared(uri)
        .map_err(|e| WicketError::ChannelEstablishment {
            endpoint: endpoint.to_string(),
            reason: format!("invalid endpoint: {e}"),
        })?
        .tls_config(tls)
        .map_err(|e| WicketError::ChannelEstablishment {
            endpoint: endpoint.to_string(),
            reason: format!("TLS credential construction failed: {e}"),
        })?;

    let lazy = dialer.connect_lazy();
    info!(
        endpoint,
        server_name = policy.server_name.as_deref().unwrap_or("<endpoint host>"),
        "Secure channel created (single-CA pinned, lazy connect)"
    );

    Ok(SecureChannel {
        endpoint: endpoint.to_string(),
        lazy,
        dialer,
    })
}

/// Reject CA material that is not a well-formed X.509 certificate.
fn validate_ca_pem(ca_cert_pem: &[u8]) -> Result<()> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(ca_cert_pem)
        .map_err(|e| WicketError::CertParse(format!("CA PEM invalid: {e}")))?;
    X509Certificate::from_der(&pem.contents)
        .map_err(|e| WicketError::CertParse(format!("CA certificate invalid: {e}")))?;
    Ok(())
}
