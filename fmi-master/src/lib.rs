//! Master-side Jacobi co-simulation coordinator for the FMI 2.0 Co-Simulation TCP protocol.
//!
//! [`config`] loads the declarative TOML description of which `fmitcp-server` instances to
//! connect to, how their variables are wired together, and the simulation's timing.
//! [`connection`] is the coordinator's in-memory data model for a single wired connection.
//! [`jacobi`] drives the actual stepping: every component advances from the same time snapshot
//! before any connection value is transferred.

pub mod config;
pub mod connection;
pub mod jacobi;

pub use config::{ComponentConfig, ConfigError, ConnectionConfig, MasterConfig, OutputColumn, StartValueOverride, parse_override};
pub use connection::{Connection, PrimitiveType, StepOrder, TypeMismatch};
pub use jacobi::{Coordinator, CoordinatorError};
