//! # CPU
//!
//! The central processing unit: the five datapath sub-blocks plus the
//! fetch/decode/execute sequencing, the stack, and the interrupt protocol.
//!
//! Datapath overview:
//!
//! ```text
//!   [Bus] --3 bytes--> [IR] --opcode--> [ControlUnit] --signals--> everything
//!                       |                                            |
//!                       +--rd/rs--> [RegisterFile] --values--> [ALU]
//!                       |                 ^                      |
//!                       +--imm8-----------|---mux--> ALU input B |
//!                                         |                      |
//!                                         +--mux-- writeback ----+
//!                                         |   (mem > imm > mov > alu)
//!                                    [memory data]
//! ```
//!
//! Each [`Cpu::step`] executes exactly one instruction, or dispatches one
//! pending interrupt instead of fetching.

mod control;
mod flags;
mod instruction_register;
mod program_counter;
mod register_file;

pub use control::{ControlSignals, ControlUnit};
pub use flags::Flags;
pub use instruction_register::InstructionRegister;
pub use program_counter::ProgramCounter;
pub use register_file::RegisterFile;

use crate::bits::{bits_to_word, word_to_bits};
use crate::combinational::{Alu, Mux2};
use crate::interrupts::IrqLine;
use crate::isa::{self, IVT_BASE, SP_RESET};
use crate::memory::MemoryBus;

/// The CPU: datapath components, scalar state, and one-instruction-per-step
/// execution.
///
/// Generic over [`MemoryBus`] so tests can run it against plain
/// [`Ram`](crate::Ram) while the [`Computer`](crate::Computer) wires in the
/// full [`Bus`](crate::Bus).
///
/// # Examples
///
/// ```
/// use nandcpu::isa::{encode, OP_HLT, OP_LDI};
/// use nandcpu::{Cpu, MemoryBus, Ram};
///
/// let mut mem = Ram::new();
/// mem.load(0, &encode(OP_LDI, 0, 0, 42));
/// mem.load(3, &encode(OP_HLT, 0, 0, 0));
///
/// let mut cpu = Cpu::new(mem);
/// cpu.step();
/// cpu.step();
/// assert_eq!(cpu.reg(0), 42);
/// assert!(cpu.is_halted());
/// ```
pub struct Cpu<M: MemoryBus> {
    memory: M,
    pc: ProgramCounter,
    ir: InstructionRegister,
    regs: RegisterFile,
    alu: Alu<8>,
    flags: Flags,
    control: ControlUnit,

    /// Stack pointer. Grows downward: push decrements then writes.
    sp: u16,
    halted: bool,
    interrupts_enabled: bool,
    irq: IrqLine,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in the reset state with its own interrupt line.
    pub fn new(memory: M) -> Self {
        Self::with_irq(memory, IrqLine::new())
    }

    /// Creates a CPU sharing `irq` with external devices.
    ///
    /// Clones of the line are the raise-interrupt capability handed to
    /// devices; the CPU drains it before each fetch.
    pub fn with_irq(memory: M, irq: IrqLine) -> Self {
        Self {
            memory,
            pc: ProgramCounter::new(),
            ir: InstructionRegister::new(),
            regs: RegisterFile::new(),
            alu: Alu::new(),
            flags: Flags::new(),
            control: ControlUnit::new(),
            sp: SP_RESET,
            halted: false,
            interrupts_enabled: false,
            irq,
        }
    }

    /// Returns to the reset state: PC 0, SP [`SP_RESET`], not halted,
    /// interrupts disabled, pending requests cleared.
    ///
    /// Memory and register-file contents are deliberately left alone, as a
    /// hardware reset line would.
    pub fn reset(&mut self) {
        self.pc.reset();
        self.sp = SP_RESET;
        self.halted = false;
        self.interrupts_enabled = false;
        self.irq.clear();
    }

    /// Executes one instruction, or vectors to one pending interrupt.
    ///
    /// The order within a step:
    ///
    /// 1. A halted CPU does nothing.
    /// 2. If interrupts are enabled and a request is pending, the
    ///    lowest-numbered one is dispatched instead of a fetch.
    /// 3. Otherwise: fetch three bytes into the IR, advance PC by 3,
    ///    derive control signals, read the register file, and execute.
    pub fn step(&mut self) {
        if self.halted {
            return;
        }

        if self.interrupts_enabled {
            if let Some(n) = self.irq.take_lowest() {
                self.enter_interrupt(n);
                return;
            }
        }

        self.fetch();
        self.decode();
        self.execute();
    }

    /// Requests interrupt `n`. Numbers outside 0..=7 are ignored.
    pub fn raise_interrupt(&mut self, n: u8) {
        self.irq.raise(n);
    }

    /// A clone of the interrupt line, for wiring devices.
    pub fn irq_line(&self) -> IrqLine {
        self.irq.clone()
    }

    // ---- step phases ----

    /// Reads the three instruction bytes at PC into the IR (one rising
    /// edge per byte), then advances PC by 3.
    fn fetch(&mut self) {
        let addr = self.pc.to_u16();
        self.ir.load([
            self.memory.read(addr),
            self.memory.read(addr.wrapping_add(1)),
            self.memory.read(addr.wrapping_add(2)),
        ]);

        self.pc.clock(false, false, 0);
        self.pc.clock(true, false, 0);
    }

    /// Derives control signals and drives both register-file read ports.
    fn decode(&mut self) {
        self.control.decode(&self.ir.opcode(), self.flags.zero);
        self.regs.read(&self.ir.rd(), &self.ir.rs());
    }

    fn execute(&mut self) {
        match self.ir.opcode_u8() {
            isa::OP_MISC => self.execute_misc(),
            isa::OP_CALL => {
                // Push the already-advanced PC as the return address
                self.push_word(self.pc.to_u16());
                self.jump(self.ir.imm16());
            }
            _ => self.execute_datapath(),
        }
    }

    /// Opcode 0x0: sub-dispatch on the `rs` field, and on `rd` within it.
    ///
    /// Both fields are two bits wide, so every pattern below is defined.
    fn execute_misc(&mut self) {
        match self.ir.rs_u8() {
            isa::MISC_RS_SYS => match self.ir.rd_u8() {
                isa::MISC_RD_NOP => {}
                isa::MISC_RD_CLI => self.interrupts_enabled = false,
                isa::MISC_RD_STI => self.interrupts_enabled = true,
                _ => self.return_from_interrupt(),
            },
            isa::MISC_RS_PUSH => {
                let value = bits_to_word(&self.regs.rd_out);
                self.push(value);
            }
            isa::MISC_RS_POP => {
                let value = word_to_bits(self.pop());
                let rd = self.ir.rd();
                self.regs.write(false, &rd, true, &value);
                self.regs.write(true, &rd, true, &value);
            }
            _ => match self.ir.rd_u8() {
                isa::MISC_RD_RET => {
                    let addr = self.pop_word();
                    self.jump(addr);
                }
                isa::MISC_RD_SWI => {
                    let n = self.ir.imm8_u8();
                    self.enter_interrupt(n);
                }
                isa::MISC_RD_JC => {
                    if self.flags.carry {
                        self.jump(self.ir.imm16());
                    }
                }
                _ => {
                    if !self.flags.carry {
                        self.jump(self.ir.imm16());
                    }
                }
            },
        }
    }

    /// Every opcode the control unit handles flows through here.
    fn execute_datapath(&mut self) {
        let s = self.control.signals;

        // ALU input B: Rs, or imm8 when alu_src_imm
        let mut b_mux: Mux2<8> = Mux2::new();
        b_mux.select(s.alu_src_imm, &self.regs.rs_out, &self.ir.imm8());

        // The ALU always runs; instructions that don't use the result
        // simply never select it
        let a = self.regs.rd_out;
        self.alu.compute(&a, &b_mux.output, s.alu_op0, s.alu_op1);

        let mem_data = if s.mem_read {
            self.memory.read(self.ir.imm16())
        } else {
            0
        };

        if s.mem_write {
            self.memory
                .write(self.ir.imm16(), bits_to_word(&self.regs.rd_out));
        }

        // Writeback mux, fixed priority: memory > immediate > mov > ALU
        let write_data = if s.reg_src_mem {
            word_to_bits(mem_data)
        } else if s.reg_src_imm {
            self.ir.imm8()
        } else if s.is_mov {
            self.regs.rs_out
        } else {
            self.alu.result
        };

        if s.reg_write {
            let rd = self.ir.rd();
            self.regs.write(false, &rd, true, &write_data);
            self.regs.write(true, &rd, true, &write_data);
        }

        if s.flags_write {
            self.flags.update(false, true, self.alu.carry, self.alu.zero);
            self.flags.update(true, true, self.alu.carry, self.alu.zero);
        }

        if s.pc_jump {
            self.jump(self.ir.imm16());
        }

        if s.halt {
            self.halted = true;
        }
    }

    // ---- interrupt protocol ----

    /// Enters handler `n`: save state, disable interrupts, vector.
    ///
    /// Used for both hardware requests (n from the pending mask) and SWI
    /// (n from imm8; any value vectors, and it is the program's job to have
    /// populated that table slot).
    fn enter_interrupt(&mut self, n: u8) {
        let packed = self.flags.pack() | (u8::from(self.interrupts_enabled) << 2);

        self.push_word(self.pc.to_u16());
        self.push(packed);
        self.interrupts_enabled = false;

        let vector = IVT_BASE.wrapping_add(u16::from(n) * 2);
        let handler = self.memory.read_word(vector);
        self.jump(handler);
    }

    /// RTI: pop the flags byte, pop the return address, restore, jump.
    ///
    /// Exactly reverses the tail of [`Cpu::enter_interrupt`], so the
    /// (flags, interrupt-enable, PC) triple round-trips.
    fn return_from_interrupt(&mut self) {
        let packed = self.pop();
        let addr = self.pop_word();

        self.flags.unpack(packed);
        self.interrupts_enabled = packed & 0b100 != 0;
        self.jump(addr);
    }

    // ---- stack and jump helpers ----

    /// Push: decrement SP, then write.
    fn push(&mut self, value: u8) {
        self.sp = self.sp.wrapping_sub(1);
        self.memory.write(self.sp, value);
    }

    /// Pop: read at SP, then increment.
    fn pop(&mut self) -> u8 {
        let value = self.memory.read(self.sp);
        self.sp = self.sp.wrapping_add(1);
        value
    }

    /// Pushes a 16-bit value high byte first, so the low byte lies at the
    /// lower address and pops first.
    fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    /// Loads PC with an absolute target through its jump mux.
    fn jump(&mut self, addr: u16) {
        self.pc.clock(false, true, addr);
        self.pc.clock(true, true, addr);
    }

    // ---- accessors ----

    /// Register `i`'s contents (0..=3).
    pub fn reg(&self, i: usize) -> u8 {
        self.regs.get(i)
    }

    /// Current program counter.
    pub fn pc(&self) -> u16 {
        self.pc.to_u16()
    }

    /// Current stack pointer.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// The zero flag.
    pub fn zero(&self) -> bool {
        self.flags.zero
    }

    /// The carry flag.
    pub fn carry(&self) -> bool {
        self.flags.carry
    }

    /// True once HLT has executed; further steps do nothing until reset.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The master interrupt-enable flag.
    pub fn interrupts_enabled(&self) -> bool {
        self.interrupts_enabled
    }

    /// The pending-interrupt mask, one bit per number 0..=7.
    pub fn pending_interrupts(&self) -> u8 {
        self.irq.pending()
    }

    /// Shared access to the memory behind the CPU.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory behind the CPU, for loading programs
    /// and inspecting state.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}
