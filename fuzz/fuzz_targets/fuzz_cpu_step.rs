//! Fuzz target for machine execution.
//!
//! Loads arbitrary bytes as a program (plus an arbitrary IVT), runs the
//! machine for a bounded number of cycles with host-side device traffic,
//! and checks the invariants that must hold for any input: no panics and
//! a sticky halt.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nandcpu::{Computer, MemoryBus};

/// Arbitrary machine setup for one fuzz run.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Raw program bytes loaded at address 0
    program: Vec<u8>,
    /// Eight arbitrary interrupt vector entries
    ivt: [u16; 8],
    /// Interrupts to raise from the host side, interleaved with steps
    raises: Vec<u8>,
    /// Bytes pushed into the UART RX queue
    rx_bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut computer = Computer::new();

    // Cap the program at the RAM region; load() would wrap into the IVT
    // and I/O window otherwise, which is legal but slow for huge inputs
    let len = input.program.len().min(0xE000);
    computer.load_program(&input.program[..len], 0);

    for (n, &handler) in input.ivt.iter().enumerate() {
        computer
            .bus_mut()
            .write_word(0xEFF0 + 2 * n as u16, handler);
    }

    for &byte in input.rx_bytes.iter().take(64) {
        computer.uart().push_rx(byte);
    }

    for &n in input.raises.iter().take(64) {
        computer.cpu_mut().raise_interrupt(n);
        computer.step();
    }

    computer.run(1000);

    // Halt must be sticky: further steps change nothing architectural
    if computer.cpu().is_halted() {
        let pc = computer.cpu().pc();
        let sp = computer.cpu().sp();
        computer.step();
        assert_eq!(computer.cpu().pc(), pc);
        assert_eq!(computer.cpu().sp(), sp);
    }

    // Drain whatever the program transmitted
    while computer.uart().pop_tx().is_some() {}
});
