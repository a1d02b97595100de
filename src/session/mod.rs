//! Gateway sessions
//!
//! A [`GatewaySession`] aggregates identity + signer + secure channel +
//! timeout policy into one handle. It is created once at startup, never
//! mutated afterwards, and safe for concurrent use: the only shared resource
//! is the multiplexed gRPC channel.
//!
//! The session does not implement the ledger protocol. It guarantees that
//! every call is signed by the bound identity and dispatched under its
//! category's timeout ceiling; payload encoding belongs to the collaborator
//! behind the [`LedgerTransport`] seam.

pub mod transport;

pub use transport::{GrpcTransport, LedgerTransport, SignedProposal};

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::timeout;
use tracing::debug;

use crate::channel::SecureChannel;
use crate::error::{Result, WicketError};
use crate::identity::{Identity, Signer};

/// The four operation categories a session exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    /// Read-only query against a single peer.
    Evaluate,
    /// Propose a transaction for multi-party endorsement.
    Endorse,
    /// Send an endorsed transaction for ordering.
    Submit,
    /// Wait for final commit confirmation.
    CommitStatus,
}

impl std::fmt::Display for OpCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpCategory::Evaluate => write!(f, "evaluate"),
            OpCategory::Endorse => write!(f, "endorse"),
            OpCategory::Submit => write!(f, "submit"),
            OpCategory::CommitStatus => write!(f, "commit-status"),
        }
    }
}

/// Per-category timeout ceilings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub evaluate: Duration,
    pub endorse: Duration,
    pub submit: Duration,
    pub commit_status: Duration,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            evaluate: Duration::from_secs(5),
            endorse: Duration::from_secs(15),
            submit: Duration::from_secs(5),
            commit_status: Duration::from_secs(60),
        }
    }
}

impl TimeoutPolicy {
    /// Ceiling for one category.
    pub fn ceiling(&self, category: OpCategory) -> Duration {
        match category {
            OpCategory::Evaluate => self.evaluate,
            OpCategory::Endorse => self.endorse,
            OpCategory::Submit => self.submit,
            OpCategory::CommitStatus => self.commit_status,
        }
    }
}

/// Fully populated gateway session. Either every field is present and bound
/// to the same MSP/peer, or the session was never constructed.
pub struct GatewaySession {
    identity: Identity,
    signer: Signer,
    channel: SecureChannel,
    timeouts: TimeoutPolicy,
    transport: Arc<dyn LedgerTransport>,
}

impl std::fmt::Debug for GatewaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewaySession")
            .field("identity", &self.identity)
            .field("signer", &self.signer)
            .field("channel", &self.channel)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl GatewaySession {
    /// Aggregate already-valid parts into a session. Pure construction —
    /// never fails.
    pub fn open(
        identity: Identity,
        signer: Signer,
        channel: SecureChannel,
        timeouts: TimeoutPolicy,
    ) -> Self {
        let transport = Arc::new(GrpcTransport::new(channel.grpc()));
        Self {
            identity,
            signer,
            channel,
            timeouts,
            transport,
        }
    }

    /// Substitute the transport behind the dispatch seam. The protocol-owning
    /// collaborator (and tests) provide their own implementation.
    pub fn with_transport(mut self, transport: Arc<dyn LedgerTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn timeouts(&self) -> &TimeoutPolicy {
        &self.timeouts
    }

    /// `host:port` of the peer this session is bound to.
    pub fn peer_endpoint(&self) -> &str {
        self.channel.endpoint()
    }

    /// Read-only query, 5s ceiling.
    pub async fn evaluate(&self, payload: Bytes) -> Result<Bytes> {
        self.call(OpCategory::Evaluate, payload, None).await
    }

    /// Endorsement proposal, 15s ceiling.
    pub async fn endorse(&self, payload: Bytes) -> Result<Bytes> {
        self.call(OpCategory::Endorse, payload, None).await
    }

    /// Submission for ordering, 5s ceiling.
    pub async fn submit(&self, payload: Bytes) -> Result<Bytes> {
        self.call(OpCategory::Submit, payload, None).await
    }

    /// Commit confirmation wait, 60s ceiling.
    pub async fn commit_status(&self, payload: Bytes) -> Result<Bytes> {
        self.call(OpCategory::CommitStatus, payload, None).await
    }

    /// Issue a call with a caller-supplied deadline. The deadline is clamped
    /// to the category ceiling — never extended beyond it.
    pub async fn call_with_deadline(
        &self,
        category: OpCategory,
        payload: Bytes,
        deadline: Duration,
    ) -> Result<Bytes> {
        self.call(category, payload, Some(deadline)).await
    }

    async fn call(
        &self,
        category: OpCategory,
        payload: Bytes,
        deadline: Option<Duration>,
    ) -> Result<Bytes> {
        let ceiling = self.timeouts.ceiling(category);
        let budget = deadline.map_or(ceiling, |d| d.min(ceiling));

        let signature = self.signer.sign(&payload)?;
        let proposal = SignedProposal {
            payload,
            signature,
            msp_id: self.identity.msp_id().to_string(),
        };

        debug!(%category, ?budget, "Dispatching signed call");
        match timeout(budget, self.transport.dispatch(category, proposal)).await {
            Ok(result) => result,
            Err(_) => Err(WicketError::Deadline { category, budget }),
        }
    }

    /// Tear the session down, releasing the channel deterministically.
    pub fn close(self) {
        self.channel.close();
    }
}
