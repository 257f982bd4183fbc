//! Wire schema and framing for the FMI 2.0 Co-Simulation TCP protocol.
//!
//! This crate defines the request/response messages exchanged between an
//! `fmi-tcp-server` instance and an `fmi-tcp-client`/`fmi-master` caller, and the
//! [`tokio_util::codec`] codecs that frame them over a TCP stream.

pub mod codec;
pub mod logger;
pub mod message;

pub use codec::{ClientCodec, DecodeError, Frame, ServerCodec};
pub use message::{FmiTcpRequest, FmiTcpResponse, OpKind, ValueRef, WireStatus};
