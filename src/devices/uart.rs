//! Serial I/O device.

use std::collections::VecDeque;

use crate::interrupts::IrqLine;

/// Byte-oriented serial device raising interrupt 2 on received data.
///
/// ## Register map (offsets within the UART's slot of the I/O window)
///
/// | Offset | Register | Access | Description                             |
/// |--------|----------|--------|-----------------------------------------|
/// | 0      | Data     | R/W    | Write transmits; read receives one byte |
/// | 1      | Status   | R      | Bit 0 = RX available, bit 1 = TX ready  |
///
/// Transmission is unbounded and instantaneous from the program's point of
/// view, so TX-ready (status bit 1) is always set. Reads of the data
/// register dequeue from the RX FIFO and return 0 when it is empty.
///
/// The host side of the wire is the API below the register interface:
/// [`Uart::push_rx`] simulates a character arriving (raising interrupt 2
/// per byte) and [`Uart::pop_tx`] drains what the program transmitted.
///
/// # Examples
///
/// ```
/// use nandcpu::devices::Uart;
/// use nandcpu::IrqLine;
///
/// let mut uart = Uart::new(IrqLine::new());
///
/// uart.write_reg(0, b'H');
/// uart.write_reg(0, b'i');
/// assert_eq!(uart.pop_tx(), Some(b'H'));
/// assert_eq!(uart.pop_tx(), Some(b'i'));
/// assert_eq!(uart.pop_tx(), None);
/// ```
pub struct Uart {
    irq: IrqLine,
    rx: VecDeque<u8>,
    tx: VecDeque<u8>,
}

impl Uart {
    /// Interrupt number raised per received byte.
    pub const INTERRUPT: u8 = 2;

    /// Creates a UART with empty FIFOs.
    pub fn new(irq: IrqLine) -> Self {
        Self {
            irq,
            rx: VecDeque::new(),
            tx: VecDeque::new(),
        }
    }

    /// Handles a CPU write to register `reg`.
    pub fn write_reg(&mut self, reg: u16, value: u8) {
        if reg == 0 {
            self.tx.push_back(value);
        }
        // Status register is read-only; other offsets are dropped
    }

    /// Handles a CPU read of register `reg`.
    ///
    /// Reading the data register consumes one RX byte, which is why the
    /// bus read path needs mutable access to the device.
    pub fn read_reg(&mut self, reg: u16) -> u8 {
        match reg {
            0 => self.rx.pop_front().unwrap_or(0),
            1 => {
                let rx_ready = u8::from(!self.rx.is_empty());
                rx_ready | 0b10 // TX always ready
            }
            _ => 0,
        }
    }

    /// Host side: delivers a byte to the RX FIFO and raises interrupt 2.
    pub fn push_rx(&mut self, byte: u8) {
        self.rx.push_back(byte);
        self.irq.raise(Self::INTERRUPT);
    }

    /// Host side: drains one transmitted byte.
    pub fn pop_tx(&mut self) -> Option<u8> {
        self.tx.pop_front()
    }

    /// Host side: true when the program has transmitted undrained bytes.
    pub fn has_tx_output(&self) -> bool {
        !self.tx.is_empty()
    }
}
