//! Length-delimited framing for [`FmiTcpRequest`]/[`FmiTcpResponse`] over a byte stream.
//!
//! Frames are `u32` big-endian length prefix + bincode payload, matching the original
//! reference's length-prefixed `lacewing` framing. An empty frame, or a frame whose payload is
//! a single `b'\n'`, is a keepalive: it carries no message and is swallowed by the codec rather
//! than handed to callers.

use bytes::{Buf, BytesMut};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

use crate::message::{FmiTcpRequest, FmiTcpResponse};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown operation tag {tag} (not in the enumeration)")]
    UnknownOperation { tag: u64 },
    #[error("malformed frame: {0}")]
    Malformed(#[from] bincode::Error),
}

/// Deserializes a frame's payload, turning bincode's own out-of-range enum discriminant error
/// into [`DecodeError::UnknownOperation`] rather than a generic malformed-payload error — the two
/// are distinct error kinds.
fn decode_message<T: DeserializeOwned>(frame: &[u8]) -> Result<T, DecodeError> {
    bincode::deserialize(frame).map_err(|err| match *err {
        bincode::ErrorKind::InvalidTagEncoding(tag) => {
            DecodeError::UnknownOperation { tag: tag as u64 }
        }
        _ => DecodeError::Malformed(err),
    })
}

/// A decoded frame: either a real message, or a keepalive with no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<T> {
    Message(T),
    Keepalive,
}

fn is_keepalive_payload(bytes: &[u8]) -> bool {
    bytes.is_empty() || bytes == b"\n"
}

/// Server-side codec: decodes [`FmiTcpRequest`], encodes [`FmiTcpResponse`].
pub struct ServerCodec {
    inner: LengthDelimitedCodec,
}

impl Default for ServerCodec {
    fn default() -> Self {
        Self {
            inner: LengthDelimitedCodec::new(),
        }
    }
}

impl Decoder for ServerCodec {
    type Item = Frame<FmiTcpRequest>;
    type Error = DecodeError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(frame) = self.inner.decode(src)? else {
            return Ok(None);
        };
        if is_keepalive_payload(&frame) {
            return Ok(Some(Frame::Keepalive));
        }
        let request: FmiTcpRequest = decode_message(&frame)?;
        Ok(Some(Frame::Message(request)))
    }
}

impl Encoder<FmiTcpResponse> for ServerCodec {
    type Error = DecodeError;

    fn encode(&mut self, item: FmiTcpResponse, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = bincode::serialize(&item)?;
        self.inner
            .encode(payload.into(), dst)
            .map_err(DecodeError::Io)
    }
}

/// Client-side codec: encodes [`FmiTcpRequest`], decodes [`FmiTcpResponse`].
pub struct ClientCodec {
    inner: LengthDelimitedCodec,
}

impl Default for ClientCodec {
    fn default() -> Self {
        Self {
            inner: LengthDelimitedCodec::new(),
        }
    }
}

impl Decoder for ClientCodec {
    type Item = Frame<FmiTcpResponse>;
    type Error = DecodeError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(frame) = self.inner.decode(src)? else {
            return Ok(None);
        };
        if is_keepalive_payload(&frame) {
            return Ok(Some(Frame::Keepalive));
        }
        let response: FmiTcpResponse = decode_message(&frame)?;
        Ok(Some(Frame::Message(response)))
    }
}

impl Encoder<FmiTcpRequest> for ClientCodec {
    type Error = DecodeError;

    fn encode(&mut self, item: FmiTcpRequest, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = bincode::serialize(&item)?;
        self.inner
            .encode(payload.into(), dst)
            .map_err(DecodeError::Io)
    }
}

/// Builds a keepalive frame (single `\n` payload) ready to be written ahead of the length
/// codec, for callers that want to ping a connection without going through `Encoder`.
pub fn keepalive_bytes() -> BytesMut {
    let mut buf = BytesMut::with_capacity(5);
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(b"\n");
    buf
}

/// Strips the leading length prefix from a raw buffer, for diagnostics/logging that want to
/// inspect a frame's payload length without fully decoding it.
pub fn peek_frame_len(src: &BytesMut) -> Option<u32> {
    if src.len() < 4 {
        return None;
    }
    Some((&src[..4]).get_u32())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{FmiTcpRequest, FmiTcpResponse, WireStatus};

    #[test]
    fn round_trips_a_do_step_request() {
        let mut codec = ClientCodec::default();
        let mut server = ServerCodec::default();
        let mut buf = BytesMut::new();

        let req = FmiTcpRequest::DoStep {
            message_id: 7,
            fmu_id: 0,
            current_communication_point: 1.0,
            communication_step_size: 0.01,
            new_step: true,
        };
        codec.encode(req.clone(), &mut buf).unwrap();

        let decoded = server.decode(&mut buf).unwrap().unwrap();
        match decoded {
            Frame::Message(FmiTcpRequest::DoStep { message_id, .. }) => {
                assert_eq!(message_id, 7)
            }
            _ => panic!("expected a DoStep message"),
        }
    }

    #[test]
    fn empty_frame_decodes_as_keepalive() {
        let mut server = ServerCodec::default();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(server.decode(&mut buf).unwrap(), Some(Frame::Keepalive));
    }

    #[test]
    fn newline_frame_decodes_as_keepalive() {
        let mut server = ServerCodec::default();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(b"\n");
        assert_eq!(server.decode(&mut buf).unwrap(), Some(Frame::Keepalive));
    }

    #[test]
    fn tag_past_the_known_variants_is_an_unknown_operation_not_a_malformed_frame() {
        let mut server = ServerCodec::default();
        let mut buf = BytesMut::new();
        let payload = 9_999u32.to_le_bytes();
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        buf.extend_from_slice(&payload);

        match server.decode(&mut buf) {
            Err(DecodeError::UnknownOperation { tag }) => assert_eq!(tag, 9_999),
            other => panic!("expected UnknownOperation, got {other:?}"),
        }
    }

    #[test]
    fn response_round_trips_through_client_decoder() {
        let mut server = ServerCodec::default();
        let mut client = ClientCodec::default();
        let mut buf = BytesMut::new();

        let resp = FmiTcpResponse::DoStep {
            message_id: 9,
            status: WireStatus::Ok,
        };
        server.encode(resp, &mut buf).unwrap();

        match client.decode(&mut buf).unwrap().unwrap() {
            Frame::Message(FmiTcpResponse::DoStep { message_id, status }) => {
                assert_eq!(message_id, 9);
                assert_eq!(status, WireStatus::Ok);
            }
            _ => panic!("expected a DoStep response"),
        }
    }
}
