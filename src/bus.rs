//! # System Bus
//!
//! [`Bus`] routes every CPU access to RAM or to the memory-mapped I/O
//! window according to a fixed memory map:
//!
//! ```text
//! 0x0000..=0xEFEF   RAM (code / data / stack)
//! 0xEFF0..=0xEFFF   IVT: eight 2-byte little-endian handler addresses
//! 0xF000..=0xFFFF   memory-mapped I/O
//! ```
//!
//! The IVT is ordinary RAM (programs populate it with plain stores), so
//! the bus only distinguishes the RAM and I/O regions.
//!
//! Devices plug in through a pair of callbacks registered with
//! [`Bus::attach_io`], keyed by offset within the I/O window. One dispatcher
//! can multiplex several devices by offset range, which is how the
//! [`Computer`](crate::computer::Computer) wires the timer (offsets
//! 0x000-0x001) and the UART (0x002-0x003) onto a single pair.

use crate::isa::IO_BASE;
use crate::memory::{MemoryBus, Ram};

/// I/O read handler: offset within the I/O window → byte.
///
/// Takes `Fn`, not `FnMut`, because bus reads go through `&self`; handlers
/// that mutate device state on read (the UART RX dequeue) capture an
/// `Rc<RefCell<_>>` handle.
pub type IoRead = Box<dyn Fn(u16) -> u8>;

/// I/O write handler: offset within the I/O window plus the written byte.
pub type IoWrite = Box<dyn FnMut(u16, u8)>;

/// The system bus: 60 KiB-visible RAM plus a 4 KiB I/O window.
///
/// With no dispatcher attached, I/O reads return 0 and I/O writes are
/// dropped, the same contract as unmapped addresses on real hardware.
///
/// # Examples
///
/// ```
/// use nandcpu::{Bus, MemoryBus};
///
/// let mut bus = Bus::new();
/// bus.write(0x1000, 0x42);
/// assert_eq!(bus.read(0x1000), 0x42);
///
/// // No dispatcher: the I/O window reads as zero
/// assert_eq!(bus.read(0xF000), 0x00);
/// ```
pub struct Bus {
    ram: Ram,
    io_read: Option<IoRead>,
    io_write: Option<IoWrite>,
}

impl Bus {
    /// Creates a bus with zeroed RAM and no I/O dispatcher.
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            io_read: None,
            io_write: None,
        }
    }

    /// Registers the I/O dispatcher callbacks.
    ///
    /// Both receive addresses relative to the start of the I/O window
    /// (0x000..=0xFFF). Registering again replaces the previous pair.
    pub fn attach_io(&mut self, read: IoRead, write: IoWrite) {
        self.io_read = Some(read);
        self.io_write = Some(write);
    }

    /// Direct access to the backing RAM, bypassing the memory map.
    ///
    /// For tests and debugging; the CPU always goes through
    /// [`MemoryBus::read`]/[`MemoryBus::write`].
    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> u8 {
        if addr >= IO_BASE {
            match &self.io_read {
                Some(io_read) => io_read(addr - IO_BASE),
                None => 0,
            }
        } else {
            self.ram.read(addr)
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr >= IO_BASE {
            if let Some(io_write) = &mut self.io_write {
                io_write(addr - IO_BASE, value);
            }
        } else {
            self.ram.write(addr, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_ram_region_routes_to_ram() {
        let mut bus = Bus::new();
        bus.write(0x0000, 0x11);
        bus.write(0xEFFF, 0x22);
        assert_eq!(bus.read(0x0000), 0x11);
        assert_eq!(bus.read(0xEFFF), 0x22);
    }

    #[test]
    fn test_io_region_without_dispatcher() {
        let mut bus = Bus::new();
        // Reads return 0, writes are dropped without touching RAM
        assert_eq!(bus.read(0xF000), 0);
        bus.write(0xF123, 0xFF);
        assert_eq!(bus.read(0xF123), 0);
    }

    #[test]
    fn test_io_dispatch_receives_window_offsets() {
        let mut bus = Bus::new();
        let written: Rc<RefCell<Vec<(u16, u8)>>> = Rc::new(RefCell::new(Vec::new()));
        let written_clone = Rc::clone(&written);

        bus.attach_io(
            Box::new(|offset| (offset & 0xFF) as u8),
            Box::new(move |offset, value| written_clone.borrow_mut().push((offset, value))),
        );

        assert_eq!(bus.read(0xF000), 0x00);
        assert_eq!(bus.read(0xF042), 0x42);

        bus.write(0xF001, 0xAB);
        assert_eq!(*written.borrow(), vec![(0x001, 0xAB)]);
    }

    #[test]
    fn test_word_helpers_cross_the_map() {
        let mut bus = Bus::new();
        bus.write_word(0x2000, 0x1234);
        assert_eq!(bus.read_word(0x2000), 0x1234);
    }

    #[test]
    fn test_io_boundary() {
        let mut bus = Bus::new();
        bus.write(0xEFFF, 0x77); // last RAM byte
        bus.write(0xF000, 0x88); // first I/O offset, dropped (no dispatcher)
        assert_eq!(bus.read(0xEFFF), 0x77);
        assert_eq!(bus.read(0xF000), 0x00);
    }
}
