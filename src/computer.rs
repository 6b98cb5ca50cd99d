//! # Computer
//!
//! The top-level system: a [`Cpu`] running against the [`Bus`], with the
//! [`Timer`] and [`Uart`] wired into the I/O window and onto the CPU's
//! interrupt line.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::devices::{Timer, Uart};
use crate::interrupts::IrqLine;
use crate::isa::{TIMER_CTRL, TIMER_RELOAD, UART_DATA, UART_STATUS};
use crate::memory::MemoryBus;

/// A complete machine.
///
/// Ownership is deliberately one-directional: the `Computer` owns the CPU
/// (which owns the bus) and the devices; the devices hold only a clone of
/// the CPU's [`IrqLine`], and the bus reaches them through the `Rc` handles
/// captured in its I/O dispatcher. No component holds a reference back to
/// the CPU.
///
/// The driver loop is the one the hardware implies: devices advance
/// between CPU steps, never during one.
///
/// # Examples
///
/// ```
/// use nandcpu::isa::{encode, OP_ADD, OP_HLT, OP_LDI};
/// use nandcpu::Computer;
///
/// let mut computer = Computer::new();
/// let program: Vec<u8> = [
///     encode(OP_LDI, 0, 0, 3),
///     encode(OP_LDI, 1, 0, 5),
///     encode(OP_ADD, 0, 1, 0),
///     encode(OP_HLT, 0, 0, 0),
/// ]
/// .concat();
///
/// computer.load_program(&program, 0);
/// computer.run(100);
/// assert_eq!(computer.cpu().reg(0), 8);
/// ```
pub struct Computer {
    cpu: Cpu<Bus>,
    timer: Rc<RefCell<Timer>>,
    uart: Rc<RefCell<Uart>>,
}

impl Computer {
    /// Builds the machine: bus, CPU, devices, and the I/O dispatcher
    /// multiplexing the timer (offsets 0x000-0x001) and the UART
    /// (0x002-0x003).
    pub fn new() -> Self {
        let irq = IrqLine::new();
        let timer = Rc::new(RefCell::new(Timer::new(irq.clone())));
        let uart = Rc::new(RefCell::new(Uart::new(irq.clone())));

        let mut bus = Bus::new();
        let read_timer = Rc::clone(&timer);
        let read_uart = Rc::clone(&uart);
        let write_timer = Rc::clone(&timer);
        let write_uart = Rc::clone(&uart);

        bus.attach_io(
            Box::new(move |offset| match offset {
                TIMER_RELOAD..=TIMER_CTRL => read_timer.borrow().read_reg(offset),
                UART_DATA..=UART_STATUS => read_uart.borrow_mut().read_reg(offset - UART_DATA),
                _ => 0,
            }),
            Box::new(move |offset, value| match offset {
                TIMER_RELOAD..=TIMER_CTRL => write_timer.borrow_mut().write_reg(offset, value),
                UART_DATA..=UART_STATUS => {
                    write_uart.borrow_mut().write_reg(offset - UART_DATA, value)
                }
                _ => {}
            }),
        );

        Self {
            cpu: Cpu::with_irq(bus, irq),
            timer,
            uart,
        }
    }

    /// Writes `program` bytes into memory starting at `addr`.
    pub fn load_program(&mut self, program: &[u8], addr: u16) {
        self.cpu.memory_mut().load(addr, program);
    }

    /// Runs until halt or `max_cycles`, ticking the timer before every CPU
    /// step. Returns the number of cycles consumed.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        let mut cycles = 0;
        while !self.cpu.is_halted() && cycles < max_cycles {
            self.step();
            cycles += 1;
        }
        cycles
    }

    /// One driver cycle: timer tick, then one CPU step.
    pub fn step(&mut self) {
        self.timer.borrow_mut().tick();
        self.cpu.step();
    }

    /// Resets the CPU (PC, SP, halt, interrupt state). Memory, registers,
    /// and device state survive, as they would through a hardware reset
    /// line.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// The CPU, for inspecting registers, flags, and halt state.
    pub fn cpu(&self) -> &Cpu<Bus> {
        &self.cpu
    }

    /// Mutable CPU access, for raising interrupts or stepping manually.
    pub fn cpu_mut(&mut self) -> &mut Cpu<Bus> {
        &mut self.cpu
    }

    /// The bus, for direct memory reads/writes (IVT setup, assertions).
    pub fn bus_mut(&mut self) -> &mut Bus {
        self.cpu.memory_mut()
    }

    /// Host-side handle on the timer.
    pub fn timer(&self) -> RefMut<'_, Timer> {
        self.timer.borrow_mut()
    }

    /// Host-side handle on the UART, for pushing RX bytes and draining TX.
    pub fn uart(&self) -> RefMut<'_, Uart> {
        self.uart.borrow_mut()
    }
}

impl Default for Computer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{encode, IO_BASE, OP_HLT, OP_LD, OP_LDI, OP_ST, TIMER_CTRL, TIMER_RELOAD};

    #[test]
    fn test_load_program_lands_in_ram() {
        let mut computer = Computer::new();
        computer.load_program(&[1, 2, 3], 0x0100);
        assert_eq!(computer.bus_mut().read(0x0100), 1);
        assert_eq!(computer.bus_mut().read(0x0102), 3);
    }

    #[test]
    fn test_run_returns_cycles_consumed() {
        let mut computer = Computer::new();
        let program: Vec<u8> = [encode(OP_LDI, 0, 0, 1), encode(OP_HLT, 0, 0, 0)].concat();
        computer.load_program(&program, 0);

        let cycles = computer.run(100);
        assert_eq!(cycles, 2);
        assert!(computer.cpu().is_halted());
    }

    #[test]
    fn test_run_honors_cycle_bound() {
        let mut computer = Computer::new();
        // JMP 0: spins forever
        computer.load_program(&encode(crate::isa::OP_JMP, 0, 0, 0), 0);

        let cycles = computer.run(25);
        assert_eq!(cycles, 25);
        assert!(!computer.cpu().is_halted());
    }

    #[test]
    fn test_cpu_reaches_timer_registers_through_io_window() {
        let mut computer = Computer::new();
        let program: Vec<u8> = [
            encode(OP_LDI, 0, 0, 9),
            encode(OP_ST, 0, 0, IO_BASE + TIMER_RELOAD),
            encode(OP_LD, 1, 0, IO_BASE + TIMER_RELOAD),
            encode(OP_HLT, 0, 0, 0),
        ]
        .concat();
        computer.load_program(&program, 0);
        computer.run(100);

        assert_eq!(computer.cpu().reg(1), 9, "counter read back via LD");
    }

    #[test]
    fn test_unmapped_io_reads_zero_and_drops_writes() {
        let mut computer = Computer::new();
        let program: Vec<u8> = [
            encode(OP_LDI, 0, 0, 0xFF),
            encode(OP_ST, 0, 0, 0xFFF0),
            encode(OP_LD, 1, 0, 0xFFF0),
            encode(OP_HLT, 0, 0, 0),
        ]
        .concat();
        computer.load_program(&program, 0);
        computer.run(100);

        assert_eq!(computer.cpu().reg(1), 0);
    }

    #[test]
    fn test_reset_preserves_device_state() {
        let mut computer = Computer::new();
        computer.bus_mut().write(IO_BASE + TIMER_RELOAD, 7);
        computer.bus_mut().write(IO_BASE + TIMER_CTRL, 0b10);
        computer.reset();

        assert_eq!(computer.bus_mut().read(IO_BASE + TIMER_RELOAD), 7);
        assert_eq!(computer.bus_mut().read(IO_BASE + TIMER_CTRL) & 0b10, 0b10);
    }
}
