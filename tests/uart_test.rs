//! UART device driven through the I/O window: transmit, receive, status
//! polling, and the receive interrupt.

use nandcpu::isa::*;
use nandcpu::{Computer, MemoryBus};

fn set_ivt(computer: &mut Computer, n: u8, handler: u16) {
    computer
        .bus_mut()
        .write_word(IVT_BASE + 2 * u16::from(n), handler);
}

#[test]
fn test_transmit_two_bytes() {
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LDI, 0, 0, u16::from(b'H')),
        encode(OP_ST, 0, 0, IO_BASE + UART_DATA),
        encode(OP_LDI, 0, 0, u16::from(b'i')),
        encode(OP_ST, 0, 0, IO_BASE + UART_DATA),
        encode(OP_HLT, 0, 0, 0),
    ]
    .concat();
    computer.load_program(&program, 0);
    computer.run(100);

    assert!(computer.uart().has_tx_output());
    assert_eq!(computer.uart().pop_tx(), Some(b'H'));
    assert_eq!(computer.uart().pop_tx(), Some(b'i'));
    assert_eq!(computer.uart().pop_tx(), None);
}

#[test]
fn test_receive_byte_pushed_by_host() {
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LD, 1, 0, IO_BASE + UART_DATA),
        encode(OP_HLT, 0, 0, 0),
    ]
    .concat();
    computer.load_program(&program, 0);

    computer.uart().push_rx(b'Z');
    computer.run(100);

    assert_eq!(computer.cpu().reg(1), b'Z');
}

#[test]
fn test_read_of_empty_rx_returns_zero() {
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LD, 1, 0, IO_BASE + UART_DATA),
        encode(OP_HLT, 0, 0, 0),
    ]
    .concat();
    computer.load_program(&program, 0);
    computer.run(100);

    assert_eq!(computer.cpu().reg(1), 0);
}

#[test]
fn test_status_polling() {
    // Program spins on status bit 0, then reads the byte when it shows up.
    // Since the host pushes before running, the first poll already passes.
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LD, 0, 0, IO_BASE + UART_STATUS), // addr 0
        encode(OP_LDI, 1, 0, 1),                    // addr 3
        encode(OP_AND, 0, 1, 0),                    // addr 6: isolate RX bit
        encode(OP_JZ, 0, 0, 0),                     // addr 9: loop while empty
        encode(OP_LD, 2, 0, IO_BASE + UART_DATA),   // addr 12
        encode(OP_HLT, 0, 0, 0),                    // addr 15
    ]
    .concat();
    computer.load_program(&program, 0);

    computer.uart().push_rx(0x5A);
    computer.run(1000);

    assert_eq!(computer.cpu().reg(2), 0x5A);
    assert!(computer.cpu().is_halted());
}

#[test]
fn test_tx_ready_always_set() {
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LD, 3, 0, IO_BASE + UART_STATUS),
        encode(OP_HLT, 0, 0, 0),
    ]
    .concat();
    computer.load_program(&program, 0);
    computer.run(100);

    assert_eq!(computer.cpu().reg(3) & 0b10, 0b10);
}

#[test]
fn test_rx_interrupt_echo() {
    // Handler reads the received byte and transmits it back
    let mut computer = Computer::new();
    set_ivt(&mut computer, 2, 0x0100);

    let program: Vec<u8> = [
        encode(OP_MISC, MISC_RD_STI, MISC_RS_SYS, 0), // addr 0
        encode(OP_JMP, 0, 0, 3),                      // addr 3: spin
    ]
    .concat();
    computer.load_program(&program, 0);

    let handler: Vec<u8> = [
        encode(OP_LD, 0, 0, IO_BASE + UART_DATA), // 0x100
        encode(OP_ST, 0, 0, IO_BASE + UART_DATA), // 0x103
        encode(OP_HLT, 0, 0, 0),                  // 0x106
    ]
    .concat();
    computer.load_program(&handler, 0x0100);

    computer.step(); // STI
    computer.uart().push_rx(b'Q');
    computer.run(100);

    assert!(computer.cpu().is_halted());
    assert_eq!(computer.uart().pop_tx(), Some(b'Q'));
}

#[test]
fn test_rx_fifo_preserves_order_across_reads() {
    let mut computer = Computer::new();
    let program: Vec<u8> = [
        encode(OP_LD, 0, 0, IO_BASE + UART_DATA),
        encode(OP_LD, 1, 0, IO_BASE + UART_DATA),
        encode(OP_LD, 2, 0, IO_BASE + UART_DATA),
        encode(OP_HLT, 0, 0, 0),
    ]
    .concat();
    computer.load_program(&program, 0);

    computer.uart().push_rx(10);
    computer.uart().push_rx(20);
    computer.uart().push_rx(30);
    computer.run(100);

    assert_eq!(computer.cpu().reg(0), 10);
    assert_eq!(computer.cpu().reg(1), 20);
    assert_eq!(computer.cpu().reg(2), 30);
}
