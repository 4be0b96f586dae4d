//! Share and randomness types.

/// Number of PRD bits the masked inversion consumes.
pub const PRD_BITS: u32 = 18;

/// Two-share Boolean masking of a byte (or a narrower field element packed
/// into a byte): the represented value is `data ^ mask`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shares {
    /// Masked value share.
    pub data: u8,
    /// Mask share.
    pub mask: u8,
}

impl Shares {
    /// Builds a share pair from its two halves.
    #[inline]
    pub const fn new(data: u8, mask: u8) -> Self {
        Self { data, mask }
    }

    /// Recombines the shares. Test and caller-side use only; the engine
    /// itself never calls this on a sensitive value.
    #[inline]
    pub const fn unmask(self) -> u8 {
        self.data ^ self.mask
    }

    /// Share-wise XOR; the result represents the XOR of the two values.
    #[inline]
    pub const fn xor(self, rhs: Self) -> Self {
        Self::new(self.data ^ rhs.data, self.mask ^ rhs.mask)
    }
}

/// Pseudo-random word feeding the masked inversion.
///
/// The register is 24 bits wide but only the low [`PRD_BITS`] are wired into
/// the datapath. Each fresh mask comes from a fixed bit field, matching the
/// fixed wiring of the hardware: one 4-bit mask for the GF(2^4) product in
/// the GF(2^8) inversion, three 2-bit masks inside the GF(2^4) inversion,
/// and two 4-bit masks for the output-share multiplications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prd(
    /// Raw register value; only the low [`PRD_BITS`] reach the datapath.
    pub u32,
);

impl Prd {
    #[inline]
    pub(crate) const fn crumb(self, lo: u32) -> u8 {
        ((self.0 >> lo) & 0x3) as u8
    }

    #[inline]
    pub(crate) const fn nibble(self, lo: u32) -> u8 {
        ((self.0 >> lo) & 0xf) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_recombine() {
        let s = Shares::new(0xa5, 0x5a);
        assert_eq!(s.unmask(), 0xff);
        let t = Shares::new(0x0f, 0x01);
        assert_eq!(s.xor(t).unmask(), 0xff ^ 0x0e);
    }

    #[test]
    fn prd_fields() {
        let prd = Prd(0x3abcd);
        assert_eq!(prd.nibble(0), 0xd);
        assert_eq!(prd.crumb(4), (0x3abcd >> 4) as u8 & 0x3);
        assert_eq!(prd.nibble(14), (0x3abcd >> 14) as u8 & 0xf);
    }
}
