//! CLI command implementations
//!
//! Every command builds the registry from the built-in catalog plus the
//! optional `schema_dir`, then answers with one JSON response line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog;
use crate::model::Hydrator;
use crate::observability::{
    log_event, DiagnosticSink, Event, LogSink, LogStream, Logger, MemorySink,
};
use crate::schema::ModelRegistry;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of extra descriptor files (optional)
    #[serde(default)]
    pub schema_dir: Option<String>,

    /// Forward decode diagnostics to the logger (optional, default true)
    #[serde(default = "default_diagnostics")]
    pub diagnostics: bool,

    /// Stream for log lines (optional, default "stderr")
    #[serde(default)]
    pub diagnostic_stream: LogStream,

    /// Directory the config file was read from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_diagnostics() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_dir: None,
            diagnostics: default_diagnostics(),
            diagnostic_stream: LogStream::default(),
            base_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.base_dir = path.parent().map(Path::to_path_buf);
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if let Some(dir) = &self.schema_dir {
            if dir.trim().is_empty() {
                return Err(CliError::config_error("schema_dir must not be empty"));
            }
        }
        Ok(())
    }

    /// Descriptor directory, relative paths resolved against the config file
    pub fn schema_path(&self) -> Option<PathBuf> {
        let dir = Path::new(self.schema_dir.as_deref()?);
        match &self.base_dir {
            Some(base) if dir.is_relative() => Some(base.join(dir)),
            _ => Some(dir.to_path_buf()),
        }
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.diagnostic_stream)
    }
}

/// Build the registry: built-in catalog plus `schema_dir` descriptors
pub fn build_registry(config: &Config, logger: &Logger) -> CliResult<ModelRegistry> {
    let mut registry = ModelRegistry::builtin()?;

    if let Some(dir) = config.schema_path() {
        let loaded = registry.load_dir(&dir)?;
        registry.validate_references()?;
        log_event(
            logger,
            Event::DescriptorsLoaded,
            &[
                ("dir", &dir.to_string_lossy()),
                ("count", &loaded.to_string()),
            ],
        );
    }

    Ok(registry)
}

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Models { config } => models(config.as_deref()),
        Command::Describe { model, config } => describe(&model, config.as_deref()),
        Command::Resolve { model, config } => resolve(&model, config.as_deref()),
        Command::Decode { model, config } => decode(&model, config.as_deref()),
    }
}

struct Session {
    config: Config,
    logger: Logger,
    registry: ModelRegistry,
}

impl Session {
    fn open(config_path: Option<&Path>) -> CliResult<Self> {
        let config = Config::load_or_default(config_path)?;
        let logger = config.logger();
        if let Some(path) = config_path {
            log_event(
                &logger,
                Event::ConfigLoaded,
                &[("path", &path.to_string_lossy())],
            );
        }
        let registry = build_registry(&config, &logger)?;
        Ok(Self {
            config,
            logger,
            registry,
        })
    }
}

/// Print registered model names
pub fn models(config_path: Option<&Path>) -> CliResult<()> {
    let session = Session::open(config_path)?;
    write_response(models_data(&session.registry))
}

/// Print one descriptor and the endpoints exchanging it
pub fn describe(model: &str, config_path: Option<&Path>) -> CliResult<()> {
    let session = Session::open(config_path)?;
    write_response(describe_data(&session.registry, model)?)
}

/// Resolve the concrete model of a stdin payload
pub fn resolve(model: &str, config_path: Option<&Path>) -> CliResult<()> {
    let session = Session::open(config_path)?;
    let input = read_request()?;
    write_response(resolve_data(&session.registry, model, &input)?)
}

/// Decode a stdin payload and print its projection
pub fn decode(model: &str, config_path: Option<&Path>) -> CliResult<()> {
    let session = Session::open(config_path)?;
    let input = read_request()?;

    let log_sink = LogSink::new(session.logger);
    let forward: Option<&dyn DiagnosticSink> = if session.config.diagnostics {
        Some(&log_sink)
    } else {
        None
    };

    match decode_data(&session, model, &input, forward) {
        Ok(data) => write_response(data),
        Err(e) => {
            log_event(
                &session.logger,
                Event::DecodeFailed,
                &[("model", model), ("code", e.code_str())],
            );
            Err(e)
        }
    }
}

pub(crate) fn models_data(registry: &ModelRegistry) -> Value {
    json!(registry.names())
}

pub(crate) fn describe_data(registry: &ModelRegistry, model: &str) -> CliResult<Value> {
    let descriptor = registry.require(model)?;
    Ok(json!({
        "descriptor": &**descriptor,
        "endpoints": catalog::endpoints_for(model),
    }))
}

pub(crate) fn resolve_data(
    registry: &ModelRegistry,
    model: &str,
    input: &Value,
) -> CliResult<Value> {
    let concrete = Hydrator::new(registry).resolve_subtype(model, input)?;
    Ok(json!({ "model": model, "resolved": concrete }))
}

/// Decodes `input`, handing every diagnostic to `forward` whether or not
/// decoding succeeds.
fn decode_data(
    session: &Session,
    model: &str,
    input: &Value,
    forward: Option<&dyn DiagnosticSink>,
) -> CliResult<Value> {
    let memory = MemorySink::new();
    let decoded = Hydrator::new(&session.registry)
        .with_sink(&memory)
        .decode(model, input);

    let diagnostics = memory.entries();
    if let Some(forward) = forward {
        for diagnostic in &diagnostics {
            forward.emit(diagnostic);
        }
    }
    let record = decoded?;

    log_event(
        &session.logger,
        Event::DecodeComplete,
        &[
            ("model", record.type_name()),
            ("diagnostics", &diagnostics.len().to_string()),
        ],
    );

    Ok(json!({
        "model": record.type_name(),
        "value": record.to_json(),
        "diagnostics": diagnostics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir, config: Value) -> PathBuf {
        let config_path = temp_dir.path().join("sdkmodel.json");
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    fn session(config: Config) -> Session {
        let logger = config.logger();
        let registry = build_registry(&config, &logger).unwrap();
        Session {
            config,
            logger,
            registry,
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let config = Config::load_or_default(None).unwrap();
        assert!(config.diagnostics);
        assert_eq!(config.diagnostic_stream, LogStream::Stderr);
        assert!(config.schema_path().is_none());
    }

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_config(
            &temp_dir,
            json!({"diagnostics": false, "diagnostic_stream": "stdout"}),
        );

        let config = Config::load(&path).unwrap();
        assert!(!config.diagnostics);
        assert_eq!(config.diagnostic_stream, LogStream::Stdout);
    }

    #[test]
    fn test_invalid_stream_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_config(&temp_dir, json!({"diagnostic_stream": "syslog"}));

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "SDK_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_schema_dir_relative_to_config() {
        let temp_dir = TempDir::new().unwrap();
        let descriptors = temp_dir.path().join("descriptors");
        fs::create_dir(&descriptors).unwrap();
        fs::write(
            descriptors.join("widget.json"),
            json!({
                "name": "Widget",
                "fields": [
                    {"name": "label", "wire_key": "label", "type": "string"},
                    {"name": "key_ref", "wire_key": "keyRef", "type": "model", "model": "Key"}
                ]
            })
            .to_string(),
        )
        .unwrap();
        let path = create_config(&temp_dir, json!({"schema_dir": "descriptors"}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config.schema_path().unwrap(), descriptors);

        let registry = build_registry(&config, &config.logger()).unwrap();
        assert!(registry.contains("Widget"));
        assert!(registry.contains("Key"));
    }

    #[test]
    fn test_schema_dir_dangling_reference() {
        let temp_dir = TempDir::new().unwrap();
        let descriptors = temp_dir.path().join("descriptors");
        fs::create_dir(&descriptors).unwrap();
        fs::write(
            descriptors.join("orphan.json"),
            json!({
                "name": "Orphan",
                "fields": [
                    {"name": "child", "wire_key": "child", "type": "model", "model": "Missing"}
                ]
            })
            .to_string(),
        )
        .unwrap();
        let path = create_config(&temp_dir, json!({"schema_dir": "descriptors"}));

        let config = Config::load(&path).unwrap();
        let err = build_registry(&config, &config.logger()).unwrap_err();
        assert_eq!(err.code_str(), "SDK_MODEL_UNKNOWN_MODEL");
    }

    #[test]
    fn test_models_sorted() {
        let registry = ModelRegistry::builtin().unwrap();
        let data = models_data(&registry);
        let names: Vec<&str> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"EncryptedData"));
    }

    #[test]
    fn test_describe_includes_endpoints() {
        let registry = ModelRegistry::builtin().unwrap();
        let data = describe_data(&registry, "RoleAssignment").unwrap();
        assert_eq!(data["descriptor"]["name"], "RoleAssignment");
        assert_eq!(data["endpoints"][0]["service"], "roleAssignments");

        let err = describe_data(&registry, "Nope").unwrap_err();
        assert_eq!(err.code_str(), "SDK_MODEL_UNKNOWN_MODEL");
    }

    #[test]
    fn test_resolve() {
        let registry = ModelRegistry::builtin().unwrap();
        let data = resolve_data(
            &registry,
            "HostInsight",
            &json!({"entitySource": "PE_COMANAGED_HOST"}),
        )
        .unwrap();
        assert_eq!(data["resolved"], "PeComanagedHostInsight");
    }

    #[test]
    fn test_decode_reports_diagnostics() {
        let session = session(Config {
            diagnostics: false,
            ..Config::default()
        });
        let data = decode_data(
            &session,
            "Key",
            &json!({"id": "ocid1.key", "lifecycleState": "NOT_A_REAL_STATE"}),
            None,
        )
        .unwrap();

        assert_eq!(data["model"], "Key");
        assert_eq!(data["value"]["lifecycleState"], "UNKNOWN_ENUM_VALUE");
        assert_eq!(data["diagnostics"][0]["field"], "lifecycle_state");
        assert_eq!(data["diagnostics"][0]["value"], "NOT_A_REAL_STATE");
    }

    #[test]
    fn test_decode_strict_enum_fails() {
        let session = session(Config::default());
        let err = decode_data(
            &session,
            "SignDataDetails",
            &json!({"signingAlgorithm": "NOT_REAL"}),
            None,
        )
        .unwrap_err();
        assert_eq!(err.code_str(), "SDK_MODEL_INVALID_ENUM_VALUE");
    }

    #[test]
    fn test_decode_forwards_diagnostics() {
        let session = session(Config::default());
        let forwarded = MemorySink::new();
        decode_data(
            &session,
            "Vault",
            &json!({"vaultType": "SOMETHING_NEW"}),
            Some(&forwarded),
        )
        .unwrap();
        assert_eq!(forwarded.len(), 1);
    }

    #[test]
    fn test_decode_failure_still_forwards_diagnostics() {
        let session = session(Config::default());
        let forwarded = MemorySink::new();
        let err = decode_data(
            &session,
            "Key",
            &json!({"lifecycleState": "NOT_A_REAL_STATE", "timeCreated": "yesterday"}),
            Some(&forwarded),
        )
        .unwrap_err();

        assert_eq!(err.code_str(), "SDK_MODEL_TYPE_MISMATCH");
        let entries = forwarded.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, "lifecycle_state");
    }
}
