//! Ledger transport seam
//!
//! The session signs and budgets calls; the transport moves them. The default
//! [`GrpcTransport`] sends the payload verbatim as a unary raw-bytes call to
//! the category's gateway method path, carrying the signature and MSP id in
//! request metadata — this core defines no wire format of its own. Components
//! that own the ledger protocol substitute their transport via
//! [`GatewaySession::with_transport`](super::GatewaySession::with_transport).

use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use http::uri::PathAndQuery;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::metadata::MetadataValue;
use tonic::transport::Channel;
use tonic::Status;

use super::OpCategory;
use crate::error::{Result, WicketError};

/// One signed call ready for dispatch.
pub struct SignedProposal {
    pub payload: Bytes,
    pub signature: Vec<u8>,
    pub msp_id: String,
}

/// Dispatch seam between the session and the protocol-owning collaborator.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    async fn dispatch(&self, category: OpCategory, proposal: SignedProposal) -> Result<Bytes>;
}

/// Default transport: unary raw-bytes gRPC per category over the pinned
/// channel.
pub struct GrpcTransport {
    channel: Channel,
}

impl GrpcTransport {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }

    fn method_path(category: OpCategory) -> PathAndQuery {
        match category {
            OpCategory::Evaluate => PathAndQuery::from_static("/gateway.Gateway/Evaluate"),
            OpCategory::Endorse => PathAndQuery::from_static("/gateway.Gateway/Endorse"),
            OpCategory::Submit => PathAndQuery::from_static("/gateway.Gateway/Submit"),
            OpCategory::CommitStatus => {
                PathAndQuery::from_static("/gateway.Gateway/CommitStatus")
            }
        }
    }
}

#[async_trait]
impl LedgerTransport for GrpcTransport {
    async fn dispatch(&self, category: OpCategory, proposal: SignedProposal) -> Result<Bytes> {
        // Metadata is validated before the channel is touched so a bad MSP id
        // surfaces as its own error, not a connection failure.
        let msp: MetadataValue<_> = proposal.msp_id.parse().map_err(|_| {
            WicketError::Transport(format!(
                "MSP id '{}' is not valid metadata",
                proposal.msp_id
            ))
        })?;

        let mut request = tonic::Request::new(proposal.payload);
        request.metadata_mut().insert_bin(
            "proposal-signature-bin",
            MetadataValue::from_bytes(&proposal.signature),
        );
        request.metadata_mut().insert("proposal-mspid", msp);

        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| WicketError::Transport(format!("channel not ready: {e}")))?;

        let response = grpc
            .unary(request, Self::method_path(category), RawCodec)
            .await
            .map_err(|status| WicketError::Transport(format!("{category}: {status}")))?;

        Ok(response.into_inner())
    }
}

/// Pass-through codec: the payload is already encoded by the protocol layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec for RawCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = RawEncoder;
    type Decoder = RawDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        RawEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        RawDecoder
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RawEncoder;

impl Encoder for RawEncoder {
    type Item = Bytes;
    type Error = Status;

    fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> std::result::Result<(), Status> {
        dst.put(item);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RawDecoder;

impl Decoder for RawDecoder {
    type Item = Bytes;
    type Error = Status;

    fn decode(
        &mut self,
        src: &mut DecodeBuf<'_>,
    ) -> std::result::Result<Option<Bytes>, Status> {
        Ok(Some(src.copy_to_bytes(src.remaining())))
    }
}
