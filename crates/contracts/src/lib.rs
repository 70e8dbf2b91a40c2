//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Storage Model
//! - Reports are opaque bytes, appended to numbered slot files
//! - Slots are consumed in index order and retired once they reach the cap

mod blueprint;
mod error;
mod sink;
mod slot;

pub use blueprint::*;
pub use error::*;
pub use sink::*;
pub use slot::*;
