use clap::Parser;

/// Serve one FMI 2.0 Co-Simulation component over the `fmitcp` TCP protocol.
#[derive(Debug, Parser)]
#[command(name = "fmitcp-server")]
pub struct ServerOptions {
    /// Path to the FMU archive to serve, or the literal "dummy" to serve a canned-response
    /// adapter without loading any FMU (protocol conformance testing).
    pub archive: String,

    /// Address to bind the listener to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the listener to.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Enable FMI debug logging on the underlying component from the moment it is instantiated.
    #[arg(long)]
    pub debug_logging: bool,

    /// Log level/spec for the server process itself (e.g. "info", "debug"). Falls back to
    /// `RUST_LOG` when unset.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Respond to model-exchange placeholder operations by silently dropping them (no response)
    /// instead of the default explicit `status=error`.
    #[arg(long)]
    pub silent_drop_unimplemented: bool,
}
