//! Slot types - Slot Store output
//!
//! A slot is one fixed-index rotating file inside the error directory.

use serde::Serialize;
use std::path::PathBuf;

/// Observed state of a slot file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// No file exists yet
    Vacant,
    /// File exists and is below the cap
    Open,
    /// File is at or above the cap
    Retired,
}

impl SlotState {
    /// Whether an append may target this slot
    pub fn accepts_writes(self) -> bool {
        !matches!(self, SlotState::Retired)
    }
}

/// State of one slot at inspection time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub index: usize,
    pub path: PathBuf,
    /// Current file size (0 for vacant slots)
    pub size: u64,
    pub state: SlotState,
}

/// Result of a successful append
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendReceipt {
    /// Slot the payload was appended to
    pub slot: usize,
    pub path: PathBuf,
    /// Payload length plus the blank-line separator
    pub bytes_written: u64,
}

/// Aggregate view over all slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotUsage {
    pub vacant: usize,
    pub open: usize,
    pub retired: usize,
    pub total_bytes: u64,
}

impl SlotUsage {
    /// Summarize a list of slot statuses
    pub fn from_slots(slots: &[SlotStatus]) -> Self {
        slots.iter().fold(Self::default(), |mut usage, slot| {
            match slot.state {
                SlotState::Vacant => usage.vacant += 1,
                SlotState::Open => usage.open += 1,
                SlotState::Retired => usage.retired += 1,
            }
            usage.total_bytes += slot.size;
            usage
        })
    }

    /// True when no slot can take another append
    pub fn is_exhausted(&self) -> bool {
        self.vacant == 0 && self.open == 0
    }
}
