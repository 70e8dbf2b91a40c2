//! Command implementations.

mod serve;
mod status;
mod validate;

pub use serve::run_serve;
pub use status::run_status;
pub use validate::run_validate;

use contracts::ServiceBlueprint;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CliError, Result};

/// Load the blueprint from `path`, or fall back to compiled-in defaults
fn load_blueprint(path: Option<&Path>) -> Result<ServiceBlueprint> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()));
            }
            info!(config = %path.display(), "Loading configuration");
            Ok(config_loader::ConfigLoader::load_from_path(path)?)
        }
        None => {
            info!("No configuration file given, using defaults");
            Ok(ServiceBlueprint::default())
        }
    }
}

/// Apply an `--app-root` override and re-validate
fn apply_app_root(blueprint: &mut ServiceBlueprint, app_root: Option<&PathBuf>) -> Result<()> {
    if let Some(root) = app_root {
        info!(app_root = %root.display(), "Overriding application root from CLI");
        blueprint.store.app_root = root.clone();
    }
    config_loader::ConfigLoader::validate(blueprint)?;
    Ok(())
}
