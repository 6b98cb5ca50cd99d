//! The arithmetic logic unit.

use super::RippleCarryAdder;
use crate::gates;

/// N-bit ALU with four operations selected by two opcode bits:
///
/// | op1 op0 | op  | semantics                          |
/// |---------|-----|------------------------------------|
/// | 0   0   | ADD | A + B                              |
/// | 0   1   | SUB | A + NOT(B) + 1 (two's complement)  |
/// | 1   0   | AND | bitwise A AND B                    |
/// | 1   1   | OR  | bitwise A OR B                     |
///
/// The arithmetic and logic paths are computed in parallel and `op1`
/// selects which one drives the output. On the arithmetic path `op0` XORs
/// into B (inverting it for SUB) and doubles as the adder's carry-in,
/// which is exactly the two's-complement `A - B = A + NOT(B) + 1`.
///
/// `carry` is meaningful only for arithmetic and is forced low for the
/// logic ops. `zero` is high when every output bit is low.
///
/// # Examples
///
/// ```
/// use nandcpu::bits::{bits_to_word, word_to_bits};
/// use nandcpu::combinational::Alu;
///
/// let mut alu: Alu<8> = Alu::new();
///
/// alu.compute(&word_to_bits(7), &word_to_bits(7), true, false); // SUB
/// assert_eq!(bits_to_word(&alu.result), 0);
/// assert!(alu.zero);
/// assert!(alu.carry); // no borrow: 7 >= 7
/// ```
#[derive(Debug, Clone)]
pub struct Alu<const N: usize> {
    /// The N-bit result.
    pub result: [bool; N],
    /// Carry/borrow out of the arithmetic path; low for logic ops.
    pub carry: bool,
    /// High when the result is all zeros.
    pub zero: bool,
}

impl<const N: usize> Alu<N> {
    /// Creates an ALU with a zeroed output.
    pub fn new() -> Self {
        Self {
            result: [false; N],
            carry: false,
            zero: true,
        }
    }

    /// Computes one operation. `op0`/`op1` select per the table above.
    pub fn compute(&mut self, a: &[bool; N], b: &[bool; N], op0: bool, op1: bool) {
        // Arithmetic path: XOR B with op0 (inverts on SUB), op0 as carry-in
        let mut b_modified = [false; N];
        for i in 0..N {
            b_modified[i] = gates::xor(b[i], op0);
        }

        let mut adder: RippleCarryAdder<N> = RippleCarryAdder::new();
        adder.add(a, &b_modified, op0);

        // Logic path: op0 selects AND (0) or OR (1) per bit
        let mut logic = [false; N];
        for i in 0..N {
            logic[i] = gates::or(
                gates::and(gates::not(op0), gates::and(a[i], b[i])),
                gates::and(op0, gates::or(a[i], b[i])),
            );
        }

        // Output mux: op1 selects arithmetic (0) or logic (1)
        self.zero = true;
        for i in 0..N {
            self.result[i] = gates::or(
                gates::and(gates::not(op1), adder.sum[i]),
                gates::and(op1, logic[i]),
            );
            if self.result[i] {
                self.zero = false;
            }
        }

        // Carry is only meaningful on the arithmetic path
        self.carry = gates::and(gates::not(op1), adder.carry_out);
    }
}

impl<const N: usize> Default for Alu<N> {
    fn default() -> Self {
        Self::new()
    }
}
