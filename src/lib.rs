//! Wicket - ledger gateway bootstrap
//!
//! Given a hierarchical network profile describing a permissioned ledger
//! organization, wicket resolves one reachable peer endpoint and its trust
//! anchor, builds a signing identity from a certificate/private-key pair,
//! opens a TLS channel pinned to that single CA, and wraps everything in a
//! [`GatewaySession`] with distinct timeout budgets per operation category.
//!
//! ## Pieces
//!
//! - **profile**: immutable config tree + peer/user resolution
//! - **identity**: X.509 identities and private-key signers
//! - **channel**: single-CA-pinned lazy gRPC channels
//! - **session**: signed, timeout-budgeted operation dispatch
//! - **bootstrap**: the atomic startup sequence tying them together
//!
//! The session is handed to the request-handling layer as an explicit
//! constructor dependency; nothing here is process-global.

pub mod bootstrap;
pub mod channel;
pub mod config;
pub mod error;
pub mod identity;
pub mod profile;
pub mod session;

pub use bootstrap::bootstrap;
pub use channel::{dial, SecureChannel, TlsPinPolicy};
pub use config::Args;
pub use error::{CredentialField, Result, WicketError};
pub use identity::{build_identity, build_signer, Identity, Signer};
pub use profile::{resolve_peer, resolve_user, NetworkConfig, PeerDescriptor, UserCredential};
pub use session::{GatewaySession, LedgerTransport, OpCategory, SignedProposal, TimeoutPolicy};
