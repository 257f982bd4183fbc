//! Master-side client for the FMI 2.0 Co-Simulation TCP protocol.

pub mod client;

pub use client::{Client, ClientError};
