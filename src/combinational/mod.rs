//! # Combinational Blocks
//!
//! Pure, stateless-in-behavior building blocks composed from the gate
//! primitives: the one-hot [`Decoder`], the [`Mux2`]/[`Mux4`] selector
//! trees, the [`HalfAdder`]/[`FullAdder`]/[`RippleCarryAdder`] chain, and
//! the [`Alu`].
//!
//! Each block recomputes its public output fields from scratch on every
//! call; nothing here latches state between calls.

mod adder;
mod alu;
mod decoder;
mod mux;

pub use adder::{FullAdder, HalfAdder, RippleCarryAdder};
pub use alu::Alu;
pub use decoder::Decoder;
pub use mux::{Mux2, Mux4};
