//! Serial protocol layer of the masked S-box coprocessor.
//!
//! The coprocessor is driven one clock cycle at a time: an 8-bit control
//! word selects a mode (register load or result drive), an 8-bit data input
//! carries the payload, and an 8-bit output port holds the last driven
//! result. [`SboxCore`] models one cycle per [`SboxCore::step`] call;
//! [`Driver`] sequences the multi-cycle load/read protocols; [`Transcript`]
//! records cycles for serialization and replay.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod core;
mod driver;
mod mode;
mod regs;
mod transcript;

pub use crate::core::SboxCore;
pub use crate::driver::Driver;
pub use crate::mode::{Mode, QUAL_MASKED_DOMAIN, QUAL_MASKED_FLOW};
pub use crate::regs::RegisterBank;
pub use crate::transcript::{CycleRecord, ReplayMismatch, Transcript};
