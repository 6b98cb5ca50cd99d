//! ALU status flags.

use crate::gates;
use crate::sequential::DFlipFlop;

/// The two latched status flags: `zero` and `carry`.
///
/// Each lives in a [`DFlipFlop`] behind a load-enable feedback mux, the
/// same mux-before-register pattern as
/// [`Register`](crate::sequential::Register): with `load` low a flip-flop
/// recaptures its own output, so only arithmetic/logic-class instructions
/// (which assert `load`) can change the flags.
///
/// For interrupt entry the flags are packed into a byte as `bit0 = zero`,
/// `bit1 = carry`; bit 2 carries the interrupt-enable state, which the CPU
/// merges in because it is not part of this block.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Last ALU result was all zeros.
    pub zero: bool,
    /// Last arithmetic op produced a carry out.
    pub carry: bool,
    zero_ff: DFlipFlop,
    carry_ff: DFlipFlop,
}

impl Flags {
    /// Creates flags with both bits clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clocks the flags: captures `new_carry`/`new_zero` on the rising edge
    /// when `load` is high, holds otherwise.
    pub fn update(&mut self, clk: bool, load: bool, new_carry: bool, new_zero: bool) {
        let carry_in = gates::or(
            gates::and(load, new_carry),
            gates::and(gates::not(load), self.carry),
        );
        let zero_in = gates::or(
            gates::and(load, new_zero),
            gates::and(gates::not(load), self.zero),
        );

        self.carry_ff.clock(clk, carry_in);
        self.zero_ff.clock(clk, zero_in);

        self.carry = self.carry_ff.q;
        self.zero = self.zero_ff.q;
    }

    /// Packs the flags for an interrupt save: bit 0 = zero, bit 1 = carry.
    pub fn pack(&self) -> u8 {
        u8::from(self.zero) | (u8::from(self.carry) << 1)
    }

    /// Restores the flags from a packed byte, forcing the flip-flops to
    /// match through a full clock cycle each.
    pub fn unpack(&mut self, byte: u8) {
        let zero = byte & 1 != 0;
        let carry = byte & 2 != 0;

        self.zero_ff.clock(false, zero);
        self.zero_ff.clock(true, zero);
        self.carry_ff.clock(false, carry);
        self.carry_ff.clock(true, carry);

        self.zero = zero;
        self.carry = carry;
    }
}
