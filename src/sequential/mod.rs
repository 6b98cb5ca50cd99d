//! # Sequential Primitives
//!
//! The stateful building blocks of the machine, in dependency order: the
//! cross-coupled [`SrLatch`], the level-sensitive [`DLatch`], the
//! edge-triggered [`DFlipFlop`], the N-bit [`Register`], and the binary
//! [`Counter`].
//!
//! All of them expose their stored value through a public field readable at
//! any time, and all capture state only on a rising clock edge (produced by
//! calling `clock` with `clk=false` then `clk=true`).

mod counter;
mod flip_flop;
mod latch;
mod register;

pub use counter::Counter;
pub use flip_flop::DFlipFlop;
pub use latch::{DLatch, SrLatch};
pub use register::Register;
