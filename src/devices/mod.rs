//! # Peripheral Devices
//!
//! The two built-in peripherals, attached to the bus's I/O window by the
//! [`Computer`](crate::computer::Computer):
//!
//! | I/O offset | Device            |
//! |------------|-------------------|
//! | 0x000-0x001 | [`Timer`]        |
//! | 0x002-0x003 | [`Uart`]         |
//!
//! Devices never touch the CPU directly: each holds a clone of the
//! [`IrqLine`](crate::IrqLine) (the raise-interrupt capability) and the
//! bus calls their register handlers with offsets relative to their own
//! slot. Device state advances only between CPU steps, when the driver
//! loop calls [`Timer::tick`] or the host pushes UART traffic.

mod timer;
mod uart;

pub use timer::Timer;
pub use uart::Uart;
