//! 16-bit program counter.

use crate::bits::{addr_to_bits, bits_to_addr};
use crate::combinational::{Mux2, RippleCarryAdder};
use crate::sequential::Register;

/// Holds the address of the next instruction to fetch.
///
/// Internally a 16-bit [`Register`] fed by a [`Mux2`] choosing between
/// `value + 3` (instructions are three bytes) from a dedicated
/// [`RippleCarryAdder`] and an externally supplied jump target.
///
/// # Examples
///
/// ```
/// use nandcpu::cpu::ProgramCounter;
///
/// let mut pc = ProgramCounter::new();
/// pc.clock(false, false, 0);
/// pc.clock(true, false, 0);
/// assert_eq!(pc.to_u16(), 3);
///
/// pc.clock(false, true, 0x0200);
/// pc.clock(true, true, 0x0200);
/// assert_eq!(pc.to_u16(), 0x0200);
/// ```
#[derive(Debug, Clone)]
pub struct ProgramCounter {
    /// The current 16-bit value, LSB at index 0.
    pub value: [bool; 16],
    reg: Register<16>,
    adder: RippleCarryAdder<16>,
    mux: Mux2<16>,
}

/// The instruction stride, as a bit vector for the internal adder.
const THREE: [bool; 16] = [
    true, true, false, false, false, false, false, false, false, false, false, false, false,
    false, false, false,
];

impl ProgramCounter {
    /// Creates a program counter at address 0.
    pub fn new() -> Self {
        Self {
            value: [false; 16],
            reg: Register::new(),
            adder: RippleCarryAdder::new(),
            mux: Mux2::new(),
        }
    }

    /// Advances on the rising edge: to `value + 3` when `jump` is low, to
    /// `jump_addr` when it is high.
    pub fn clock(&mut self, clk: bool, jump: bool, jump_addr: u16) {
        self.adder.add(&self.value, &THREE, false);
        self.mux.select(jump, &self.adder.sum, &addr_to_bits(jump_addr));
        self.reg.clock(clk, true, &self.mux.output);
        self.value = self.reg.data_out;
    }

    /// Forces the counter to 0.
    pub fn reset(&mut self) {
        let zero = [false; 16];
        self.reg.clock(false, true, &zero);
        self.reg.clock(true, true, &zero);
        self.value = self.reg.data_out;
    }

    /// Returns the current value as an integer address.
    pub fn to_u16(&self) -> u16 {
        bits_to_addr(&self.value)
    }
}

impl Default for ProgramCounter {
    fn default() -> Self {
        Self::new()
    }
}
