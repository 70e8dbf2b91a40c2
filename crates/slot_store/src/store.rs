//! SlotStore - appends reports to the first slot with room

use bytes::Bytes;
use contracts::{
    AppendReceipt, ContractError, ReportSink, SlotState, SlotStatus, SlotUsage, StoreConfig,
};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::layout::SlotLayout;
use crate::metrics::SinkMetrics;

/// Written after every payload
pub const RECORD_SEPARATOR: &[u8] = b"\n\n";

/// Rotating slot file store
///
/// Stateless apart from metrics: every append rescans the slots on disk.
/// Concurrent appends are not coordinated, so two requests racing at a
/// slot boundary may both land in the same slot.
#[derive(Debug, Clone)]
pub struct SlotStore {
    name: String,
    layout: SlotLayout,
    max_file_size: u64,
    metrics: Arc<SinkMetrics>,
}

impl SlotStore {
    /// Create a store over the error directory described by `config`
    ///
    /// Nothing is touched on disk until the first append.
    pub fn new(name: impl Into<String>, config: &StoreConfig) -> Self {
        Self {
            name: name.into(),
            layout: SlotLayout::from_config(config),
            max_file_size: config.max_file_size,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Size at which a slot is retired
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Get shared metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Current state of every slot, in index order
    ///
    /// Read-only: a missing error directory reports every slot as vacant.
    pub fn slots(&self) -> Result<Vec<SlotStatus>, ContractError> {
        self.layout
            .slots()
            .map(|(index, path)| {
                let (size, state) = self.inspect(&path)?;
                Ok(SlotStatus {
                    index,
                    path,
                    size,
                    state,
                })
            })
            .collect()
    }

    /// Aggregate usage across all slots
    pub fn usage(&self) -> Result<SlotUsage, ContractError> {
        Ok(SlotUsage::from_slots(&self.slots()?))
    }

    /// Append `payload` plus the record separator to the first slot with room
    ///
    /// Blocking; async callers go through [`ReportSink::append`].
    pub fn append_blocking(&self, payload: &[u8]) -> Result<AppendReceipt, ContractError> {
        let result = self.try_append(payload);
        match &result {
            Ok(receipt) => {
                self.metrics.record_append(receipt.bytes_written);
                debug!(
                    sink = %self.name,
                    slot = receipt.slot,
                    bytes = receipt.bytes_written,
                    "Report appended"
                );
            }
            Err(e) if e.is_capacity_exhausted() => {
                self.metrics.inc_capacity_rejections();
                warn!(sink = %self.name, error = %e, "Report rejected, no slot left");
            }
            Err(e) => {
                self.metrics.inc_write_failures();
                error!(sink = %self.name, error = %e, "Report write failed");
            }
        }
        result
    }

    fn try_append(&self, payload: &[u8]) -> Result<AppendReceipt, ContractError> {
        self.ensure_dir()?;

        let Some(slot) = self.select_slot()? else {
            return Err(ContractError::capacity_exhausted(
                self.layout.num_slots(),
                self.max_file_size,
            ));
        };

        let path = self.layout.path(slot);
        let bytes_written = write_record(&path, payload)
            .map_err(|e| ContractError::write_failure(&path, e))?;

        Ok(AppendReceipt {
            slot,
            path,
            bytes_written,
        })
    }

    fn ensure_dir(&self) -> Result<(), ContractError> {
        let dir = self.layout.dir();
        if dir.is_dir() {
            return Ok(());
        }
        // create_dir_all treats a concurrent creation as success
        fs::create_dir_all(dir).map_err(|e| ContractError::write_failure(dir, e))?;
        info!(sink = %self.name, dir = %dir.display(), "Created error directory");
        Ok(())
    }

    /// First-fit scan: `None` means every slot is retired
    fn select_slot(&self) -> Result<Option<usize>, ContractError> {
        for (index, path) in self.layout.slots() {
            let (_, state) = self
                .inspect(&path)
                .map_err(|e| ContractError::write_failure(&path, e))?;
            if state.accepts_writes() {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Classify on size alone; a non-file below the cap is still selected
    /// and fails when opened for append
    fn inspect(&self, path: &Path) -> io::Result<(u64, SlotState)> {
        match fs::metadata(path) {
            Ok(meta) if meta.len() < self.max_file_size => Ok((meta.len(), SlotState::Open)),
            Ok(meta) => Ok((meta.len(), SlotState::Retired)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok((0, SlotState::Vacant)),
            Err(e) => Err(e),
        }
    }
}

/// Single `write_all` of payload + separator, opened in append mode
fn write_record(path: &Path, payload: &[u8]) -> io::Result<u64> {
    let mut record = Vec::with_capacity(payload.len() + RECORD_SEPARATOR.len());
    record.extend_from_slice(payload);
    record.extend_from_slice(RECORD_SEPARATOR);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&record)?;
    Ok(record.len() as u64)
}

impl ReportSink for SlotStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "slot_store_append",
        skip(self, payload),
        fields(sink = %self.name, payload_len = payload.len())
    )]
    async fn append(&self, payload: Bytes) -> Result<AppendReceipt, ContractError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.append_blocking(&payload))
            .await
            .map_err(|e| ContractError::Other(format!("append task failed: {e}")))?
    }
}
