//! Declarative TOML configuration (spec component I, ambient CLI surface): FMU server
//! addresses, connections, start values, and timing, loaded via `serde` + `toml` the way the
//! pack's other declarative configs are (`fmi-sim`'s `CommonOptions::initial_values` is the
//! precedent for the start-value override syntax this reuses).

use std::path::Path;

use crate::connection::{Connection, PrimitiveType, StepOrder};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    TypeMismatch(#[from] crate::connection::TypeMismatch),
    #[error("connection references unknown component index {0}")]
    UnknownComponent(usize),
    #[error("invalid start value override {0:?}: expected \"name=value\"")]
    InvalidOverride(String),
}

#[derive(Debug, serde::Deserialize)]
pub struct ComponentConfig {
    /// Host:port of the `fmitcp-server` instance serving this component.
    pub address: String,
    /// "variableName=value" start value overrides applied after the FMU's declared start
    /// values, taking precedence (spec §4.I).
    #[serde(default)]
    pub start_values: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ConnectionConfig {
    pub src_fmu: usize,
    pub src_value_ref: u32,
    pub src_type: PrimitiveType,
    pub dst_fmu: usize,
    pub dst_value_ref: u32,
    pub dst_type: PrimitiveType,
}

#[derive(Debug, serde::Deserialize)]
pub struct OutputColumn {
    pub name: String,
    pub fmu: usize,
    pub value_ref: u32,
}

#[derive(Debug, serde::Deserialize)]
pub struct MasterConfig {
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
    pub start_time: f64,
    pub end_time: f64,
    pub step_size: f64,
    /// Order of component indices used only for transfer/log reproducibility (spec §3);
    /// defaults to declaration order.
    #[serde(default)]
    pub step_order: Option<Vec<usize>>,
    #[serde(default)]
    pub outputs: Vec<OutputColumn>,
}

impl MasterConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: MasterConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for conn in &self.connections {
            if conn.src_fmu >= self.components.len() {
                return Err(ConfigError::UnknownComponent(conn.src_fmu));
            }
            if conn.dst_fmu >= self.components.len() {
                return Err(ConfigError::UnknownComponent(conn.dst_fmu));
            }
            Connection::new(
                conn.src_fmu,
                conn.src_value_ref,
                conn.src_type,
                conn.dst_fmu,
                conn.dst_value_ref,
                conn.dst_type,
            )?;
        }
        Ok(())
    }

    pub fn connections(&self) -> Result<Vec<Connection>, ConfigError> {
        self.connections
            .iter()
            .map(|c| {
                Connection::new(
                    c.src_fmu,
                    c.src_value_ref,
                    c.src_type,
                    c.dst_fmu,
                    c.dst_value_ref,
                    c.dst_type,
                )
                .map_err(ConfigError::from)
            })
            .collect()
    }

    pub fn step_order(&self) -> StepOrder {
        match &self.step_order {
            Some(order) => StepOrder(order.clone()),
            None => StepOrder::sequential(self.components.len()),
        }
    }
}

/// A single start-value override, resolved to the value reference and type the wire protocol
/// actually addresses a variable by — the protocol has no name-to-valueRef lookup a remote
/// master could use, so overrides are keyed by value reference rather than by the variable name
/// `fmi-sim`'s equivalent local override syntax uses.
#[derive(Debug, Clone, PartialEq)]
pub struct StartValueOverride {
    pub value_ref: u32,
    pub primitive_type: PrimitiveType,
    pub value: String,
}

/// Parses `"valueRef:type=value"`, e.g. `"3:real=1.5"`.
pub fn parse_override(raw: &str) -> Result<StartValueOverride, ConfigError> {
    let invalid = || ConfigError::InvalidOverride(raw.to_owned());
    let (key, value) = raw.split_once('=').ok_or_else(invalid)?;
    let (value_ref, kind) = key.split_once(':').ok_or_else(invalid)?;
    let value_ref: u32 = value_ref.parse().map_err(|_| invalid())?;
    let primitive_type = match kind {
        "real" => PrimitiveType::Real,
        "integer" => PrimitiveType::Integer,
        "boolean" => PrimitiveType::Boolean,
        "string" => PrimitiveType::String,
        _ => return Err(invalid()),
    };
    if value.is_empty() {
        return Err(invalid());
    }
    Ok(StartValueOverride {
        value_ref,
        primitive_type,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config() {
        let toml = r#"
            start_time = 0.0
            end_time = 1.0
            step_size = 0.1

            [[components]]
            address = "127.0.0.1:9001"

            [[components]]
            address = "127.0.0.1:9002"

            [[connections]]
            src_fmu = 0
            src_value_ref = 1
            src_type = "real"
            dst_fmu = 1
            dst_value_ref = 2
            dst_type = "real"
        "#;
        let config: MasterConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.components.len(), 2);
        assert_eq!(config.connections().unwrap().len(), 1);
    }

    #[test]
    fn rejects_mismatched_connection_types() {
        let toml = r#"
            start_time = 0.0
            end_time = 1.0
            step_size = 0.1

            [[components]]
            address = "127.0.0.1:9001"

            [[components]]
            address = "127.0.0.1:9002"

            [[connections]]
            src_fmu = 0
            src_value_ref = 1
            src_type = "real"
            dst_fmu = 1
            dst_value_ref = 2
            dst_type = "integer"
        "#;
        let config: MasterConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_override_splits_value_ref_type_and_value() {
        let parsed = parse_override("3:real=3.14").unwrap();
        assert_eq!(parsed.value_ref, 3);
        assert_eq!(parsed.primitive_type, PrimitiveType::Real);
        assert_eq!(parsed.value, "3.14");
        assert!(parse_override("no-equals-sign").is_err());
        assert!(parse_override("3=3.14").is_err());
    }

    #[test]
    fn default_step_order_is_declaration_order() {
        let toml = r#"
            start_time = 0.0
            end_time = 1.0
            step_size = 0.1

            [[components]]
            address = "127.0.0.1:9001"

            [[components]]
            address = "127.0.0.1:9002"
        "#;
        let config: MasterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.step_order().0, vec![0, 1]);
    }
}
