use std::fs::File;

use clap::Parser;
use fmi_tcp_client::{Client, ClientError};

use fmi_master::config::{parse_override, MasterConfig};
use fmi_master::{Coordinator, CoordinatorError, PrimitiveType as ConfigPrimitiveType};

mod options;

use options::MasterOptions;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] fmi_master::ConfigError),
    #[error("component {index} ({address}): {source}")]
    Connect {
        index: usize,
        address: String,
        #[source]
        source: ClientError,
    },
    #[error("component {index}: {source}")]
    Transport {
        index: usize,
        #[source]
        source: ClientError,
    },
    #[error("component {index} failed to {step}: status={status:?}")]
    Handshake {
        index: usize,
        step: &'static str,
        status: fmi_tcp_proto::WireStatus,
    },
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Applies every configured start-value override (spec §4.I) by dispatching the typed setter
/// matching its declared primitive type. Called once per component, after `instantiate` and
/// before `initialize_slave` — the only window the protocol's `Instantiated` state allows it.
async fn apply_start_values(
    client: &Client,
    index: usize,
    overrides: &[String],
) -> Result<(), RunError> {
    for raw in overrides {
        let parsed = parse_override(raw)?;
        let status = match parsed.primitive_type {
            ConfigPrimitiveType::Real => {
                let value: f64 = parsed.value.parse().map_err(|_| {
                    fmi_master::ConfigError::InvalidOverride(raw.clone())
                })?;
                client
                    .set_real(vec![parsed.value_ref], vec![value])
                    .await
                    .map_err(|source| RunError::Transport { index, source })?
            }
            ConfigPrimitiveType::Integer => {
                let value: i32 = parsed.value.parse().map_err(|_| {
                    fmi_master::ConfigError::InvalidOverride(raw.clone())
                })?;
                client
                    .set_integer(vec![parsed.value_ref], vec![value])
                    .await
                    .map_err(|source| RunError::Transport { index, source })?
            }
            ConfigPrimitiveType::Boolean => {
                let value: bool = parsed.value.parse().map_err(|_| {
                    fmi_master::ConfigError::InvalidOverride(raw.clone())
                })?;
                client
                    .set_boolean(vec![parsed.value_ref], vec![value])
                    .await
                    .map_err(|source| RunError::Transport { index, source })?
            }
            ConfigPrimitiveType::String => client
                .set_string(vec![parsed.value_ref], vec![parsed.value.clone()])
                .await
                .map_err(|source| RunError::Transport { index, source })?,
        };
        if !status.is_ok_or_warning() {
            return Err(RunError::Handshake {
                index,
                step: "apply start value override",
                status,
            });
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = MasterOptions::parse();
    let _logger = flexi_logger::Logger::try_with_env()?.start()?;

    let config = MasterConfig::from_file(&options.config)?;
    log::info!(
        "loaded config: {} components, {} connections",
        config.components.len(),
        config.connections.len()
    );

    let mut clients = Vec::with_capacity(config.components.len());
    for (index, component) in config.components.iter().enumerate() {
        log::info!("connecting to component {index} at {}", component.address);
        let client = Client::connect(component.address.as_str(), index as u32)
            .await
            .map_err(|source| RunError::Connect {
                index,
                address: component.address.clone(),
                source,
            })?;

        let status = client
            .instantiate(&format!("component-{index}"), false)
            .await
            .map_err(|source| RunError::Connect {
                index,
                address: component.address.clone(),
                source,
            })?;
        if !status.is_ok_or_warning() {
            return Err(RunError::Handshake {
                index,
                step: "instantiate",
                status,
            }
            .into());
        }

        apply_start_values(&client, index, &component.start_values).await?;

        let status = client
            .initialize_slave(None, config.start_time, Some(config.end_time))
            .await
            .map_err(|source| RunError::Connect {
                index,
                address: component.address.clone(),
                source,
            })?;
        if !status.is_ok_or_warning() {
            return Err(RunError::Handshake {
                index,
                step: "initialize_slave",
                status,
            }
            .into());
        }

        clients.push(client);
    }

    let connections = config.connections()?;
    let step_order = config.step_order();
    let mut coordinator = Coordinator::new(
        clients,
        connections,
        step_order,
        config.start_time,
        config.step_size,
    );

    let mut writer = match &options.output {
        Some(path) => Some(csv::Writer::from_writer(File::create(path)?)),
        None => None,
    };
    if let Some(writer) = writer.as_mut() {
        let mut header = vec!["time".to_owned()];
        header.extend(config.outputs.iter().map(|c| c.name.clone()));
        writer.write_record(&header)?;
    }

    while coordinator.current_time() < config.end_time {
        coordinator.step().await?;
        if let Some(writer) = writer.as_mut() {
            write_output_row(writer, &coordinator, &config).await?;
        }
    }
    if let Some(writer) = writer.as_mut() {
        writer.flush()?;
    }

    log::info!("simulation complete at t={}", coordinator.current_time());
    Ok(())
}

/// Writes one CSV row of the configured output columns, read back from the component each
/// column names via `get_real` (the coordinator's underlying `Client`s are not otherwise
/// exposed, so this re-borrows them for a read-only query after the step completes).
async fn write_output_row(
    writer: &mut csv::Writer<File>,
    coordinator: &Coordinator,
    config: &MasterConfig,
) -> Result<(), RunError> {
    let mut row = vec![coordinator.current_time().to_string()];
    for column in &config.outputs {
        let client = coordinator.component(column.fmu);
        let (status, values) = client
            .get_real(vec![column.value_ref])
            .await
            .map_err(|source| RunError::Transport {
                index: column.fmu,
                source,
            })?;
        if !status.is_ok_or_warning() {
            return Err(RunError::Handshake {
                index: column.fmu,
                step: "get_real (output)",
                status,
            });
        }
        row.push(values[0].to_string());
    }
    writer.write_record(&row)?;
    Ok(())
}
