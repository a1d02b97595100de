//! Crate-wide error type
//!
//! Every fallible path in the bootstrap funnels into [`WicketError`] so the
//! caller that drives startup sees exactly which stage failed and why. Nothing
//! is retried internally and nothing is swallowed.

use std::time::Duration;

use crate::session::OpCategory;

/// Which half of a user credential was absent from the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Cert,
    Key,
}

impl std::fmt::Display for CredentialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialField::Cert => write!(f, "cert"),
            CredentialField::Key => write!(f, "key"),
        }
    }
}

/// Errors surfaced by profile resolution, identity construction, channel
/// establishment, and session calls.
#[derive(Debug, thiserror::Error)]
pub enum WicketError {
    /// A profile key path that was expected to exist did not.
    #[error("config lookup failed at '{path}'")]
    ConfigLookup { path: String },

    /// The user entry exists but its cert or key is absent.
    #[error("user {field} not found for {user}@{msp_id}")]
    CredentialMissing {
        field: CredentialField,
        msp_id: String,
        user: String,
    },

    /// PEM/X.509 material that did not parse as a certificate.
    #[error("certificate parse failed: {0}")]
    CertParse(String),

    /// Private key PEM that did not decode to a supported algorithm.
    #[error("unsupported or malformed private key: {0}")]
    KeyFormat(String),

    /// TLS credential construction or connection establishment failed.
    #[error("channel establishment failed for {endpoint}: {reason}")]
    ChannelEstablishment { endpoint: String, reason: String },

    /// An operation ran past its category's timeout ceiling (or the caller's
    /// shorter deadline).
    #[error("{category} deadline of {budget:?} exceeded")]
    Deadline {
        category: OpCategory,
        budget: Duration,
    },

    /// Failure reported by the transport while dispatching a signed call.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Signing failed for the bound key.
    #[error("signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, WicketError>;
