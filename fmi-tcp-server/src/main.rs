use std::sync::Arc;

use clap::Parser;

use fmi_tcp_server::{
    DispatcherConfig, DummyAdapter, LifecycleState, NoopHooks, RealAdapter, Server,
    DUMMY_ARCHIVE_SENTINEL,
};

mod options;

use options::ServerOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = ServerOptions::parse();
    let _logger = match &options.log_level {
        Some(spec) => flexi_logger::Logger::try_with_str(spec)?,
        None => flexi_logger::Logger::try_with_env()?,
    }
    .start()?;

    let config = DispatcherConfig {
        silent_drop_unimplemented: options.silent_drop_unimplemented,
        enable_debug_logging_on_instantiate: options.debug_logging,
    };

    if options.archive == DUMMY_ARCHIVE_SENTINEL {
        log::info!("serving dummy adapter on {}:{}", options.host, options.port);
        let server = Server::bind(
            &options.host,
            options.port,
            DummyAdapter,
            LifecycleState::Dummy,
            config,
            Arc::new(NoopHooks),
        )
        .await?;
        server.serve().await?;
    } else {
        log::info!(
            "serving {} on {}:{}",
            options.archive,
            options.host,
            options.port
        );
        let adapter = RealAdapter::parse_archive(&options.archive)?;
        let server = Server::bind(
            &options.host,
            options.port,
            adapter,
            LifecycleState::Loaded,
            config,
            Arc::new(NoopHooks),
        )
        .await?;
        server.serve().await?;
    }

    Ok(())
}
