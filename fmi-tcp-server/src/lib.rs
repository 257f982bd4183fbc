//! Server-side implementation of the FMI 2.0 Co-Simulation TCP protocol: wraps a single loaded
//! component behind the wire schema defined in `fmi_tcp_proto`.
//!
//! [`adapter::SimulationAdapter`] is the operation surface a concrete backend implements;
//! [`real_adapter::RealAdapter`] backs it with the `fmi` crate, [`adapter::DummyAdapter`] answers
//! every call with a canned success for protocol conformance testing. [`lifecycle::LifecycleState`]
//! reifies the instance's position in the FMI lifecycle. [`dispatcher::Dispatcher`] ties the two
//! together into request-in, response-out. [`server::Server`] drives a `Dispatcher` over TCP.

pub mod adapter;
pub mod dispatcher;
pub mod lifecycle;
pub mod real_adapter;
pub mod server;

pub use adapter::{DummyAdapter, PrimitiveType, SimulationAdapter, VariableDescriptor};
pub use dispatcher::{Dispatcher, DispatcherConfig};
pub use lifecycle::{IllegalState, LifecycleState};
pub use real_adapter::{ArchiveError, RealAdapter};
pub use server::{ConnectionHandle, NoopHooks, Server, ServerError, ServerHooks};

/// The sentinel archive path that selects [`DummyAdapter`] at server construction (spec §4.E/§6).
pub const DUMMY_ARCHIVE_SENTINEL: &str = "dummy";
