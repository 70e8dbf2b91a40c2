//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Error Sink - stores client error reports in rotating slot files
#[derive(Parser, Debug)]
#[command(
    name = "error-sink",
    author,
    version,
    about = "Error report sink with fixed-size rotating slot files",
    long_about = "Accepts error reports over HTTP and appends each request body to the first \n\
                  slot file below the size cap. Once every slot is full, reports are \n\
                  refused with HTTP 500."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ERROR_SINK_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "ERROR_SINK_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the error report endpoint
    Serve(ServeArgs),

    /// Validate configuration file without serving
    Validate(ValidateArgs),

    /// Show the state of every slot file
    Status(StatusArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "ERROR_SINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override listen address from configuration
    #[arg(long, env = "ERROR_SINK_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override application root (the error directory lives below it)
    #[arg(long, env = "ERROR_SINK_APP_ROOT")]
    pub app_root: Option<PathBuf>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ERROR_SINK_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "error-sink.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, env = "ERROR_SINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override application root
    #[arg(long, env = "ERROR_SINK_APP_ROOT")]
    pub app_root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "error-sink",
            "serve",
            "--listen",
            "0.0.0.0:9999",
            "--app-root",
            "/srv/www",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.listen.unwrap().port(), 9999);
                assert_eq!(args.app_root, Some(PathBuf::from("/srv/www")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["error-sink", "-q", "-v", "status"]).is_err());
    }
}
