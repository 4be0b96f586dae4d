//! Cycle transcripts: serializable protocol vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::SboxCore;

/// One driven cycle: control word, data input, and the observed output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Control word presented this cycle.
    pub control: u8,
    /// Data input presented this cycle.
    pub data_in: u8,
    /// Output port value after the cycle.
    pub data_out: u8,
}

/// An ordered list of cycles, starting from a freshly reset core.
///
/// Transcripts serve as conformance vectors: they serialize with `bincode`
/// and can be replayed against any core to cross-check implementations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// The recorded cycles, in driving order.
    pub cycles: Vec<CycleRecord>,
}

/// Replay failure: a cycle produced an output differing from the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayMismatch {
    /// Zero-based index of the mismatching cycle.
    pub cycle: usize,
    /// Output the transcript recorded.
    pub expected: u8,
    /// Output the replayed core produced.
    pub actual: u8,
}

impl fmt::Display for ReplayMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle {}: expected output {:#04x}, got {:#04x}",
            self.cycle, self.expected, self.actual
        )
    }
}

impl std::error::Error for ReplayMismatch {}

impl Transcript {
    /// Appends one cycle record.
    pub fn push(&mut self, record: CycleRecord) {
        self.cycles.push(record);
    }

    /// Serializes the transcript with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes a transcript with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Replays the cycles on a freshly reset core, failing on the first
    /// cycle whose output differs from the record.
    pub fn replay<E: sbox_core::Substitute>(
        &self,
        core: &mut SboxCore<E>,
    ) -> Result<(), ReplayMismatch> {
        core.reset();
        for (cycle, record) in self.cycles.iter().enumerate() {
            let actual = core.step(record.control, record.data_in);
            if actual != record.data_out {
                return Err(ReplayMismatch {
                    cycle,
                    expected: record.data_out,
                    actual,
                });
            }
        }
        Ok(())
    }
}
