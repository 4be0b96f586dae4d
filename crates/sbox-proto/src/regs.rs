//! The coprocessor register bank.

/// Latched register state: data, key, and mask bytes plus the 24-bit PRD
/// word. Values persist until overwritten; everything is zero after reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterBank {
    /// Data byte. In masked operation the caller loads `plaintext ^ mask`.
    pub data: u8,
    /// Key byte, XORed into the substitution input.
    pub key: u8,
    /// Boolean mask byte.
    pub mask: u8,
    /// Pseudo-random word, assembled from three 8-bit slices. The masked
    /// datapath consumes the low 18 bits.
    pub prd: u32,
}

impl RegisterBank {
    /// Writes one 8-bit slice of the PRD word (`slice` 0..=2, low to high),
    /// leaving the other slices untouched.
    pub fn set_prd_slice(&mut self, slice: u32, byte: u8) {
        debug_assert!(slice < 3);
        let shift = slice * 8;
        self.prd = (self.prd & !(0xff << shift)) | (u32::from(byte) << shift);
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
