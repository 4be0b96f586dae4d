//! Control-word decoding.

/// Bit 6 of the control word: masked-flow qualifier. Required on the masked
/// output modes; marks masked-domain data loads together with
/// [`QUAL_MASKED_DOMAIN`].
pub const QUAL_MASKED_FLOW: u8 = 0x40;

/// Bit 7 of the control word: masked-domain select. A `DATA_IN` with this
/// bit set latches only when [`QUAL_MASKED_FLOW`] is also set.
pub const QUAL_MASKED_DOMAIN: u8 = 0x80;

/// Operating mode, encoded in the low 4 bits of the control word.
///
/// Reserved codes (0x7, 0xB..=0xF) decode to [`Mode::Idle`]: they must never
/// corrupt registers or disturb the output port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// No state change, output unchanged.
    Idle,
    /// Latch the data register.
    DataIn,
    /// Latch the key register.
    KeyIn,
    /// Latch the mask register.
    MaskIn,
    /// Latch PRD bits [7:0].
    Prd0In,
    /// Latch PRD bits [15:8].
    Prd1In,
    /// Latch PRD bits [23:16].
    Prd2In,
    /// Drive the unmasked substitution of `key ^ data`.
    UnmaskedDataOut,
    /// Drive the masked engine's data share.
    MaskedDataOut,
    /// Drive the masked engine's mask share.
    MaskedMaskOut,
}

impl Mode {
    /// Decodes the mode field of a control word.
    pub fn decode(control: u8) -> Self {
        match control & 0x0f {
            0x1 => Mode::DataIn,
            0x2 => Mode::KeyIn,
            0x3 => Mode::MaskIn,
            0x4 => Mode::Prd0In,
            0x5 => Mode::Prd1In,
            0x6 => Mode::Prd2In,
            0x8 => Mode::UnmaskedDataOut,
            0x9 => Mode::MaskedDataOut,
            0xa => Mode::MaskedMaskOut,
            _ => Mode::Idle,
        }
    }

    /// The mode's 4-bit code, for building control words.
    pub const fn code(self) -> u8 {
        match self {
            Mode::Idle => 0x0,
            Mode::DataIn => 0x1,
            Mode::KeyIn => 0x2,
            Mode::MaskIn => 0x3,
            Mode::Prd0In => 0x4,
            Mode::Prd1In => 0x5,
            Mode::Prd2In => 0x6,
            Mode::UnmaskedDataOut => 0x8,
            Mode::MaskedDataOut => 0x9,
            Mode::MaskedMaskOut => 0xa,
        }
    }
}
