//! # nandcpu: From NAND to a Working Computer
//!
//! A cycle-accurate emulator of an 8-bit CPU with a 16-bit address space,
//! memory-mapped I/O, vectored interrupts, and two built-in peripherals (a
//! countdown timer and a UART), with the CPU's datapath constructed from a
//! hierarchy of gate-level primitives.
//!
//! ## Quick start
//!
//! ```rust
//! use nandcpu::isa::{encode, OP_ADD, OP_HLT, OP_LDI};
//! use nandcpu::Computer;
//!
//! let mut computer = Computer::new();
//!
//! // LDI R0, 3; LDI R1, 5; ADD R0, R1; HLT
//! let program: Vec<u8> = [
//!     encode(OP_LDI, 0, 0, 3),
//!     encode(OP_LDI, 1, 0, 5),
//!     encode(OP_ADD, 0, 1, 0),
//!     encode(OP_HLT, 0, 0, 0),
//! ]
//! .concat();
//!
//! computer.load_program(&program, 0);
//! computer.run(1000);
//! assert_eq!(computer.cpu().reg(0), 8);
//! ```
//!
//! ## Architecture
//!
//! The crate is layered bottom-up, and every layer is observable from unit
//! tests:
//!
//! - [`gates`]: NOT, AND, OR, NAND, NOR, XOR as pure functions
//! - [`sequential`]: SR latch, D latch, D flip-flop, register, counter
//! - [`combinational`]: decoder, muxes, adders, and the ALU
//! - [`cpu`]: program counter, instruction register, register file, flags,
//!   control unit, and the fetch/decode/execute top level
//! - [`memory`] / [`bus`]: the [`MemoryBus`] seam, flat RAM, and the
//!   memory-mapped I/O routing
//! - [`interrupts`] / [`devices`]: the raise-interrupt capability and the
//!   timer/UART peripherals
//! - [`computer`]: the driver surface tying it all together
//! - [`isa`]: opcodes, the memory map, and the 3-byte instruction encoding
//!
//! The simulation is strictly single-threaded and sequential: one
//! instruction per [`Cpu::step`], device ticks between steps, and no
//! concurrency anywhere.

pub mod bits;
pub mod bus;
pub mod combinational;
pub mod computer;
pub mod cpu;
pub mod devices;
pub mod gates;
pub mod interrupts;
pub mod isa;
pub mod memory;
pub mod sequential;

// Re-export the surface most users need
pub use bus::Bus;
pub use computer::Computer;
pub use cpu::Cpu;
pub use interrupts::IrqLine;
pub use memory::{MemoryBus, Ram};
