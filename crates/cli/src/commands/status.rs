//! `status` command implementation.

use anyhow::{Context, Result};
use contracts::{SlotState, SlotStatus, SlotUsage};
use serde::Serialize;
use slot_store::SlotStore;

use super::{apply_app_root, load_blueprint};
use crate::cli::StatusArgs;

/// Slot report for JSON output
#[derive(Serialize)]
struct StatusReport {
    error_dir: String,
    max_file_size: u64,
    usage: SlotUsage,
    exhausted: bool,
    slots: Vec<SlotStatus>,
}

/// Execute the `status` command
pub fn run_status(args: &StatusArgs) -> Result<()> {
    let mut blueprint = load_blueprint(args.config.as_deref())?;
    apply_app_root(&mut blueprint, args.app_root.as_ref())?;

    let store = SlotStore::new("slot_store", &blueprint.store);
    let report = build_report(&store)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize slot status")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(store: &SlotStore) -> Result<StatusReport> {
    let slots = store.slots().with_context(|| {
        format!(
            "Failed to inspect slots in {}",
            store.layout().dir().display()
        )
    })?;
    let usage = SlotUsage::from_slots(&slots);

    Ok(StatusReport {
        error_dir: store.layout().dir().display().to_string(),
        max_file_size: store.max_file_size(),
        usage,
        exhausted: usage.is_exhausted(),
        slots,
    })
}

fn print_report(report: &StatusReport) {
    println!("Error directory: {}", report.error_dir);
    println!("Slot cap: {} bytes\n", report.max_file_size);

    for slot in &report.slots {
        let marker = match slot.state {
            SlotState::Vacant => "·",
            SlotState::Open => "▶",
            SlotState::Retired => "■",
        };
        let name = slot
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "  {} {:<20} {:>10} bytes  {:?}",
            marker, name, slot.size, slot.state
        );
    }

    let usage = &report.usage;
    println!(
        "\n  {} vacant, {} open, {} retired, {} bytes stored",
        usage.vacant, usage.open, usage.retired, usage.total_bytes
    );
    if report.exhausted {
        println!("\n⚠ Every slot is full - new reports are refused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::StoreConfig;
    use std::fs;

    #[test]
    fn test_report_marks_retired_and_open_slots() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            num_files: 3,
            max_file_size: 8,
            ..StoreConfig::with_root(dir.path())
        };
        let store = SlotStore::new("status_test", &config);
        store.append_blocking(b"123456").unwrap();
        store.append_blocking(b"abc").unwrap();

        let report = build_report(&store).unwrap();

        assert_eq!(report.slots[0].state, SlotState::Retired);
        assert_eq!(report.slots[0].size, 8);
        assert_eq!(report.slots[1].state, SlotState::Open);
        assert_eq!(report.slots[2].state, SlotState::Vacant);
        assert!(!report.exhausted);
        assert_eq!(fs::read(&report.slots[1].path).unwrap(), b"abc\n\n");
    }
}
