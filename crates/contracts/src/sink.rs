//! ReportSink trait - HTTP endpoint output interface
//!
//! Defines the abstract interface for report storage.

use bytes::Bytes;

use crate::{AppendReceipt, ContractError};

/// Report storage trait
///
/// All report stores must implement this trait.
#[trait_variant::make(ReportSink: Send)]
pub trait LocalReportSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Append one report payload
    ///
    /// # Errors
    /// - `CapacityExhausted` when no slot can take the payload
    /// - `WriteFailure` when the filesystem rejects the append
    async fn append(&self, payload: Bytes) -> Result<AppendReceipt, ContractError>;
}
