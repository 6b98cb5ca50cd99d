//! N-to-2^N decoder.

use crate::gates;

/// One-hot address decoder: asserts exactly one of `OUTPUTS` lines,
/// selected by an N-bit address, with a global enable gating all outputs.
///
/// This is how the register file selects which register to write and how
/// the control unit turns an opcode into one-hot instruction lines.
///
/// Stable Rust cannot express `[bool; 1 << N]`, so the output count is a
/// second const parameter; constructors debug-assert `OUTPUTS == 1 << N`.
///
/// # Examples
///
/// ```
/// use nandcpu::combinational::Decoder;
///
/// let mut dec: Decoder<2, 4> = Decoder::new();
/// dec.decode(&[false, true], true); // address 2
/// assert_eq!(dec.outputs, [false, false, true, false]);
///
/// // Enable low forces every line low
/// dec.decode(&[false, true], false);
/// assert_eq!(dec.outputs, [false; 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<const N: usize, const OUTPUTS: usize> {
    /// The 2^N output lines; at most one is high.
    pub outputs: [bool; OUTPUTS],
}

impl<const N: usize, const OUTPUTS: usize> Decoder<N, OUTPUTS> {
    /// Creates a decoder with all outputs low.
    pub fn new() -> Self {
        debug_assert_eq!(OUTPUTS, 1 << N);
        Self {
            outputs: [false; OUTPUTS],
        }
    }

    /// Drives the address and enable inputs.
    pub fn decode(&mut self, address: &[bool; N], enable: bool) {
        for out in 0..OUTPUTS {
            // A line matches when every address bit equals the
            // corresponding bit of the line's index
            let mut matches = true;
            for (bit, &addr_bit) in address.iter().enumerate() {
                let need_high = (out >> bit) & 1 != 0;
                let term = if need_high {
                    addr_bit
                } else {
                    gates::not(addr_bit)
                };
                matches = gates::and(matches, term);
            }
            self.outputs[out] = gates::and(matches, enable);
        }
    }
}

impl<const N: usize, const OUTPUTS: usize> Default for Decoder<N, OUTPUTS> {
    fn default() -> Self {
        Self::new()
    }
}
