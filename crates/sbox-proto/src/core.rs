//! The mode-controller state machine.

use sbox_core::{Substitute, TableSbox};
use sbox_masked::{substitute_shares, Shares};

use crate::mode::{Mode, QUAL_MASKED_DOMAIN, QUAL_MASKED_FLOW};
use crate::regs::RegisterBank;

/// One coprocessor instance: register bank, output port, and the unmasked
/// substitution engine driving `UNMASKED_DATA_OUT`.
///
/// Every mode request completes within a single [`step`](Self::step); the
/// output port retains the last driven value across `IDLE`, loads, and
/// reserved mode codes. Both masked output shares are recomputed from the
/// register bank on every read, so re-reads are idempotent and the two
/// shares may be read in either order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SboxCore<E: Substitute = TableSbox> {
    regs: RegisterBank,
    output: u8,
    engine: E,
}

impl SboxCore<TableSbox> {
    /// A fresh core using the table engine, all state zeroed.
    pub fn new() -> Self {
        Self::with_engine(TableSbox)
    }
}

impl<E: Substitute> SboxCore<E> {
    /// A fresh core using the given substitution engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            regs: RegisterBank::default(),
            output: 0,
            engine,
        }
    }

    /// Read-only view of the register bank.
    pub fn regs(&self) -> &RegisterBank {
        &self.regs
    }

    /// Current value of the output port.
    pub fn output(&self) -> u8 {
        self.output
    }

    /// Zeroes all registers and the output port.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.output = 0;
    }

    /// Executes one clock cycle and returns the output port value.
    ///
    /// At most one register is written and the output driven per call,
    /// fully determined by the control word.
    pub fn step(&mut self, control: u8, data_in: u8) -> u8 {
        let masked_flow = control & QUAL_MASKED_FLOW != 0;
        let masked_domain = control & QUAL_MASKED_DOMAIN != 0;

        match Mode::decode(control) {
            Mode::Idle => {}
            // A masked-domain load must also carry the flow qualifier.
            // Drivers issue bit7 alone as an edge-timing toggle; it
            // latches nothing.
            Mode::DataIn => {
                if !masked_domain || masked_flow {
                    self.regs.data = data_in;
                }
            }
            Mode::KeyIn => self.regs.key = data_in,
            Mode::MaskIn => self.regs.mask = data_in,
            Mode::Prd0In => self.regs.set_prd_slice(0, data_in),
            Mode::Prd1In => self.regs.set_prd_slice(1, data_in),
            Mode::Prd2In => self.regs.set_prd_slice(2, data_in),
            Mode::UnmaskedDataOut => {
                self.output = self.engine.substitute(self.regs.key ^ self.regs.data);
            }
            Mode::MaskedDataOut => {
                if masked_flow {
                    self.output = self.masked_shares().data;
                }
            }
            Mode::MaskedMaskOut => {
                if masked_flow {
                    self.output = self.masked_shares().mask;
                }
            }
        }
        self.output
    }

    /// Executes one cycle at pin level: active-low reset, enable gate.
    ///
    /// With `rst_n` low the cycle only clears state; with `ena` low the
    /// module is inert and the cycle changes nothing.
    pub fn tick(&mut self, rst_n: bool, ena: bool, control: u8, data_in: u8) -> u8 {
        if !rst_n {
            self.reset();
            return self.output;
        }
        if !ena {
            return self.output;
        }
        self.step(control, data_in)
    }

    fn masked_shares(&self) -> Shares {
        substitute_shares(self.regs.data, self.regs.mask, self.regs.key, self.regs.prd)
    }
}
