//! Multi-cycle protocol sequencing.

use sbox_core::{Substitute, TableSbox};

use crate::core::SboxCore;
use crate::mode::{Mode, QUAL_MASKED_DOMAIN, QUAL_MASKED_FLOW};
use crate::transcript::{CycleRecord, Transcript};

/// Drives a [`SboxCore`] through the load/read protocols and records every
/// cycle in a [`Transcript`].
///
/// The cycle sequences include the qualifier-bit toggles an external
/// controller performs around `DATA_IN` and the output modes.
#[derive(Clone, Debug, Default)]
pub struct Driver<E: Substitute = TableSbox> {
    core: SboxCore<E>,
    transcript: Transcript,
}

impl Driver<TableSbox> {
    /// A fresh driver over a table-engine core.
    pub fn new() -> Self {
        Self::with_engine(TableSbox)
    }
}

impl<E: Substitute> Driver<E> {
    /// A fresh driver over a core with the given substitution engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            core: SboxCore::with_engine(engine),
            transcript: Transcript::default(),
        }
    }

    /// Read-only view of the underlying core.
    pub fn core(&self) -> &SboxCore<E> {
        &self.core
    }

    /// Cycles recorded since construction or the last reset.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Consumes the driver, returning the recorded cycles.
    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    /// Resets the core and starts a fresh transcript.
    pub fn reset(&mut self) {
        self.core.reset();
        self.transcript = Transcript::default();
    }

    fn cycle(&mut self, control: u8, data_in: u8) -> u8 {
        let data_out = self.core.step(control, data_in);
        self.transcript.push(CycleRecord {
            control,
            data_in,
            data_out,
        });
        data_out
    }

    /// Latches the key register.
    pub fn load_key(&mut self, key: u8) {
        self.cycle(Mode::KeyIn.code(), key);
    }

    /// Latches the mask register.
    pub fn load_mask(&mut self, mask: u8) {
        self.cycle(Mode::MaskIn.code(), mask);
    }

    /// Loads all three PRD slices, low byte first.
    pub fn load_prd(&mut self, prd: u32) {
        self.cycle(Mode::Prd0In.code(), prd as u8);
        self.cycle(Mode::Prd1In.code(), (prd >> 8) as u8);
        self.cycle(Mode::Prd2In.code(), (prd >> 16) as u8);
    }

    /// Runs one unmasked substitution of `key ^ data`.
    pub fn substitute(&mut self, data: u8) -> u8 {
        self.cycle(Mode::DataIn.code(), data);
        self.cycle(QUAL_MASKED_DOMAIN | Mode::DataIn.code(), data);
        let out = self.cycle(QUAL_MASKED_DOMAIN | Mode::UnmaskedDataOut.code(), 0x00);
        self.cycle(Mode::UnmaskedDataOut.code(), 0x00);
        out
    }

    /// Runs one masked substitution. `masked_data` must already be
    /// `plaintext ^ mask` for the currently loaded mask register. Returns
    /// `(mask_share, data_share)`; their XOR is the substitution of
    /// `key ^ mask ^ masked_data`.
    pub fn substitute_masked(&mut self, masked_data: u8) -> (u8, u8) {
        self.cycle(Mode::DataIn.code(), masked_data);
        self.cycle(QUAL_MASKED_FLOW | Mode::DataIn.code(), masked_data);
        let mask_share = self.cycle(QUAL_MASKED_FLOW | Mode::MaskedMaskOut.code(), 0x00);
        let data_share = self.cycle(QUAL_MASKED_FLOW | Mode::MaskedDataOut.code(), 0x00);
        (mask_share, data_share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbox_core::SBOX;

    #[test]
    fn unmasked_substitution_through_the_protocol() {
        let mut driver = Driver::new();
        driver.load_key(0x42);
        assert_eq!(driver.substitute(0x10), SBOX[0x52]);
    }

    #[test]
    fn masked_substitution_through_the_protocol() {
        let mut driver = Driver::new();
        driver.load_key(0x13);
        driver.load_mask(0x15);
        driver.load_prd(0x3abcd);
        let (mask_share, data_share) = driver.substitute_masked(0x2a);
        assert_eq!(mask_share ^ data_share, SBOX[0x15 ^ 0x13 ^ 0x2a]);
    }

    #[test]
    fn transcript_records_every_cycle() {
        let mut driver = Driver::new();
        driver.load_key(0x00);
        driver.substitute(0x01);
        // One key cycle plus the four-cycle substitution sequence.
        assert_eq!(driver.transcript().cycles.len(), 5);
        driver.reset();
        assert!(driver.transcript().cycles.is_empty());
    }
}
