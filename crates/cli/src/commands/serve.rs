//! `serve` command implementation.

use anyhow::{Context, Result};
use observability::record_slot_usage;
use slot_store::SlotStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::{apply_app_root, load_blueprint};
use crate::cli::ServeArgs;
use crate::error::CliError;

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let mut blueprint = load_blueprint(args.config.as_deref())?;

    if let Some(listen) = args.listen {
        info!(listen = %listen, "Overriding listen address from CLI");
        blueprint.server.listen = listen;
    }
    apply_app_root(&mut blueprint, args.app_root.as_ref())?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let store = SlotStore::new("slot_store", &blueprint.store);
    info!(
        error_dir = %store.layout().dir().display(),
        num_files = blueprint.store.num_files,
        max_file_size = blueprint.store.max_file_size,
        route = %blueprint.server.route,
        "Configuration loaded"
    );

    match store.usage() {
        Ok(usage) => {
            record_slot_usage(&usage);
            info!(
                vacant = usage.vacant,
                open = usage.open,
                retired = usage.retired,
                total_bytes = usage.total_bytes,
                "Slot usage"
            );
            if usage.is_exhausted() {
                warn!("Every slot is full, all reports will be refused");
            }
        }
        Err(e) => warn!(error = %e, "Could not inspect slots"),
    }

    let addr = blueprint.server.listen;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| CliError::bind(addr, e))?;

    let app = report_server::router(store.clone(), &blueprint.server);
    report_server::serve(listener, app)
        .await
        .context("Error report server failed")?;

    let snapshot = store.metrics().snapshot();
    info!(
        appended = snapshot.append_count,
        bytes_written = snapshot.bytes_written,
        capacity_rejections = snapshot.capacity_rejections,
        write_failures = snapshot.write_failures,
        "Error sink finished"
    );
    Ok(())
}
