//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ServiceBlueprint;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    listen: String,
    route: String,
    error_dir: String,
    num_files: usize,
    max_file_size: u64,
    capacity_bytes: u64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(blueprint: &ServiceBlueprint) -> ConfigSummary {
    let store = &blueprint.store;
    ConfigSummary {
        version: format!("{:?}", blueprint.version),
        listen: blueprint.server.listen.to_string(),
        route: blueprint.server.route.clone(),
        error_dir: store.error_dir_path().display().to_string(),
        num_files: store.num_files,
        max_file_size: store.max_file_size,
        capacity_bytes: store.max_file_size.saturating_mul(store.num_files as u64),
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ServiceBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.store.app_root.is_relative() {
        warnings.push(format!(
            "store.app_root '{}' is relative - resolved against the working directory",
            blueprint.store.app_root.display()
        ));
    }

    if blueprint.server.max_body_bytes as u64 > blueprint.store.max_file_size {
        warnings.push(
            "server.max_body_bytes exceeds store.max_file_size - a single report can overrun a slot"
                .to_string(),
        );
    }

    if !blueprint.server.listen.ip().is_loopback() {
        warnings.push(format!(
            "server.listen {} is reachable from other hosts and reports are not authenticated",
            blueprint.server.listen
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Listen: {}{}", summary.listen, summary.route);
            println!("  Error dir: {}", summary.error_dir);
            println!(
                "  Slots: {} x {} bytes ({} bytes total)",
                summary.num_files, summary.max_file_size, summary.capacity_bytes
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_blueprint_warns_about_relative_root() {
        let warnings = collect_warnings(&ServiceBlueprint::default());
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings[0].contains("relative"));
        assert!(warnings[1].contains("max_body_bytes"));
    }

    #[test]
    fn test_summary_capacity() {
        let summary = summarize(&ServiceBlueprint::default());
        assert_eq!(summary.capacity_bytes, 10_000_000);
        assert_eq!(summary.listen, "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/error-sink.toml"),
            json: true,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }

    #[test]
    fn test_validate_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[store]\nmax_file_size = 0").unwrap();

        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        };
        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("max_file_size"));
    }
}
