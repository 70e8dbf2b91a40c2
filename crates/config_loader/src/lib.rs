//! # Config Loader
//!
//! Loads the error sink's `ServiceBlueprint`: the `[server]` table (listen
//! address, report route, body limit) and the `[store]` table (app root,
//! error directory, slot count, per-slot byte cap, slot file naming).
//!
//! Every table and key is optional; an empty file yields the stock sink of
//! ten `errors.<i>.xml` slots capped at 1 000 000 bytes. The loaded blueprint
//! is always validated, so a zero slot count or a separator in the slot
//! prefix never reaches the store.
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("error-sink.toml")).unwrap();
//! println!("Slots: {}", blueprint.store.num_files);
//! ```

mod parser;
mod validator;

pub use contracts::ServiceBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Entry point for reading and writing error sink configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a blueprint from `error-sink.toml` (or a `.json` equivalent)
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `ConfigParse` for an unknown
    /// extension or malformed content, `ConfigValidation` for bad slot limits.
    pub fn load_from_path(path: &Path) -> Result<ServiceBlueprint, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a blueprint from in-memory text, e.g. a config embedded in tests
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ServiceBlueprint, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate an already-built blueprint (e.g. defaults plus CLI overrides)
    pub fn validate(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
        validator::validate(blueprint)
    }

    /// Render the effective blueprint as TOML, defaults filled in
    pub fn to_toml(blueprint: &ServiceBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Render the effective blueprint as JSON (`validate --json`)
    pub fn to_json(blueprint: &ServiceBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ServiceBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }
}
