//! The control unit: opcode in, control signals out.

use crate::combinational::Decoder;
use crate::gates;

/// One wire per decision the CPU makes each cycle.
///
/// The writeback data mux consumes `reg_src_mem`, `reg_src_imm`, and
/// `is_mov` in fixed priority order: memory > immediate > mov > ALU result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Write a result back to the register file.
    pub reg_write: bool,
    /// Read a byte from memory at imm16.
    pub mem_read: bool,
    /// Write Rd's value to memory at imm16.
    pub mem_write: bool,
    /// ALU operation select, low bit (ADD=00, SUB=01, AND=10, OR=11).
    pub alu_op0: bool,
    /// ALU operation select, high bit.
    pub alu_op1: bool,
    /// ALU input B comes from imm8 instead of Rs.
    pub alu_src_imm: bool,
    /// Writeback data comes from memory.
    pub reg_src_mem: bool,
    /// Writeback data comes from imm8.
    pub reg_src_imm: bool,
    /// Writeback data comes from Rs (register-to-register copy).
    pub is_mov: bool,
    /// Load the PC with imm16.
    pub pc_jump: bool,
    /// Update the zero/carry flags from the ALU.
    pub flags_write: bool,
    /// Stop the CPU.
    pub halt: bool,
}

/// Pure combinational signal derivation.
///
/// A 4→16 [`Decoder`] turns the opcode into one-hot lines; each control
/// signal is an OR of the lines that need it, and the conditional jumps
/// AND their lines with the zero flag.
///
/// Opcode 0x0 (misc) and 0xE (CALL) produce no signals here: their
/// effects (stack traffic, interrupt state, sub-dispatch) are sequenced
/// directly by the CPU rather than by combinational wires.
#[derive(Debug, Clone, Default)]
pub struct ControlUnit {
    /// Signals derived by the most recent `decode`.
    pub signals: ControlSignals,
    dec: Decoder<4, 16>,
}

impl ControlUnit {
    /// Creates a control unit with all signals low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the signals for `opcode` given the current zero flag.
    pub fn decode(&mut self, opcode: &[bool; 4], zero_flag: bool) {
        self.dec.decode(opcode, true);

        let ldi = self.dec.outputs[0x1];
        let ld = self.dec.outputs[0x2];
        let st = self.dec.outputs[0x3];
        let add = self.dec.outputs[0x4];
        let sub = self.dec.outputs[0x5];
        let and = self.dec.outputs[0x6];
        let or = self.dec.outputs[0x7];
        let mov = self.dec.outputs[0x8];
        let cmp = self.dec.outputs[0x9];
        let jmp = self.dec.outputs[0xA];
        let jz = self.dec.outputs[0xB];
        let jnz = self.dec.outputs[0xC];
        let addi = self.dec.outputs[0xD];
        let hlt = self.dec.outputs[0xF];
        // 0x0 (misc) and 0xE (CALL) are sequenced by the CPU

        let s = &mut self.signals;

        s.reg_write = gates::or(
            gates::or(gates::or(ldi, ld), gates::or(add, sub)),
            gates::or(gates::or(and, or), gates::or(mov, addi)),
        );

        s.mem_read = ld;
        s.mem_write = st;

        // ALU select: ADD=00, SUB=01, AND=10, OR=11; CMP runs the SUB path
        s.alu_op0 = gates::or(sub, gates::or(or, cmp));
        s.alu_op1 = gates::or(and, or);

        s.alu_src_imm = addi;

        s.reg_src_mem = ld;
        s.reg_src_imm = ldi;
        s.is_mov = mov;

        s.pc_jump = gates::or(
            jmp,
            gates::or(
                gates::and(jz, zero_flag),
                gates::and(jnz, gates::not(zero_flag)),
            ),
        );

        s.flags_write = gates::or(
            gates::or(add, sub),
            gates::or(gates::or(and, or), gates::or(cmp, addi)),
        );

        s.halt = hlt;
    }
}
