use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "migration";
const ENV_PREFIX: &str = "MIGRATE";
const DEFAULT_CARRIER_CODE: &str = "YAMATO";
const DEFAULT_CARRIER_NAME: &str = "ヤマト運輸";
const DEFAULT_STORE_NAME: &str = "集配所";
const DEFAULT_SHIPPER_TYPE: &str = "既存荷主";
const DEFAULT_HISTORY_DESCRIPTION: &str = "履歴データ移行";
const DEFAULT_HISTORY_ACTOR: &str = "migration";
const DEFAULT_FALLBACK_STORE_ID: i64 = 1;

/// File name of the destination DDL script looked up next to the executable.
pub const SCHEMA_FILE_NAME: &str = "schema.sql";

/// What to do with legacy OrderHistory rows whose order was not migrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderHistoryPolicy {
    /// Copy every legacy history row, referenced order or not.
    #[default]
    CopyAll,
    /// Skip (and count) history rows whose legacy order was skipped or never existed.
    SkipOrphans,
}

/// Migration run configuration
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Destination DDL script; `schema.sql` next to the executable when unset
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Carrier written on every migrated store; the legacy schema has no carrier column
    #[serde(default = "default_carrier_code")]
    #[validate(length(min = 1, message = "carrier_code must not be empty"))]
    pub carrier_code: String,

    #[serde(default = "default_carrier_name")]
    #[validate(length(min = 1, message = "carrier_name must not be empty"))]
    pub carrier_name: String,

    /// Placeholder name for stores with a blank legacy name
    #[serde(default = "default_store_name")]
    #[validate(length(min = 1, message = "default_store_name must not be empty"))]
    pub default_store_name: String,

    /// `ShipperType` tag for shippers created from legacy customers
    #[serde(default = "default_shipper_type")]
    #[validate(length(min = 1, message = "shipper_type must not be empty"))]
    pub shipper_type: String,

    #[serde(default = "default_history_description")]
    #[validate(length(min = 1, message = "history_description must not be empty"))]
    pub history_description: String,

    #[serde(default = "default_history_actor")]
    #[validate(length(min = 1, message = "history_actor must not be empty"))]
    pub history_actor: String,

    /// Store used for migrated orders when no store is flagged default
    #[serde(default = "default_fallback_store_id")]
    #[validate(range(min = 1, message = "fallback_store_id must be at least 1"))]
    pub fallback_store_id: i64,

    #[serde(default)]
    pub order_history_policy: OrderHistoryPolicy,

    /// Wrap each migration phase in its own transaction
    #[serde(default)]
    pub transaction_per_phase: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            schema_path: None,
            carrier_code: default_carrier_code(),
            carrier_name: default_carrier_name(),
            default_store_name: default_store_name(),
            shipper_type: default_shipper_type(),
            history_description: default_history_description(),
            history_actor: default_history_actor(),
            fallback_store_id: DEFAULT_FALLBACK_STORE_ID,
            order_history_policy: OrderHistoryPolicy::default(),
            transaction_per_phase: false,
        }
    }
}

impl MigrationConfig {
    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Resolves the DDL script location.
    ///
    /// An explicit override wins over `schema_path`; otherwise the script is
    /// used when it sits alongside the running binary. `None` means the copy of
    /// `schema/schema.sql` compiled into the binary.
    pub fn resolve_schema_path(&self, overridden: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = overridden {
            return Some(path.to_path_buf());
        }
        if let Some(path) = &self.schema_path {
            return Some(path.clone());
        }
        let exe = env::current_exe().ok()?;
        let beside_binary = exe.parent()?.join(SCHEMA_FILE_NAME);
        beside_binary.is_file().then_some(beside_binary)
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("設定ファイル読み込みエラー: {0}")]
    Load(#[from] ConfigError),

    #[error("設定値エラー: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_carrier_code() -> String {
    DEFAULT_CARRIER_CODE.to_string()
}

fn default_carrier_name() -> String {
    DEFAULT_CARRIER_NAME.to_string()
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_shipper_type() -> String {
    DEFAULT_SHIPPER_TYPE.to_string()
}

fn default_history_description() -> String {
    DEFAULT_HISTORY_DESCRIPTION.to_string()
}

fn default_history_actor() -> String {
    DEFAULT_HISTORY_ACTOR.to_string()
}

fn default_fallback_store_id() -> i64 {
    DEFAULT_FALLBACK_STORE_ID
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("highlandirect_migration={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_target(false)
            .try_init();
    }
}

/// Loads the migration configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. `config/migration.toml` if present
/// 3. The file passed on the command line, if any
/// 4. Environment variables (MIGRATE__*)
///
/// Runs before tracing is initialized, so failures surface only through the
/// returned error.
pub fn load_config(extra_file: Option<&Path>) -> Result<MigrationConfig, ConfigLoadError> {
    let mut builder = Config::builder()
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, CONFIG_FILE)).required(false));

    if let Some(path) = extra_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let migration_config: MigrationConfig = config.try_deserialize()?;

    migration_config.validate()?;

    Ok(migration_config)
}
