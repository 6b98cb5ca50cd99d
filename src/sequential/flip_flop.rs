//! Edge-triggered D flip-flop.

use super::DLatch;
use crate::gates;

/// D-type flip-flop: samples its input only on the rising clock edge.
///
/// Built from two [`DLatch`]es in a master-slave configuration. The master
/// is transparent while the clock is low, the slave while it is high, so
/// the output can only change at the instant the clock goes 0→1.
///
/// Callers produce an edge by clocking twice:
///
/// ```
/// use nandcpu::sequential::DFlipFlop;
///
/// let mut ff = DFlipFlop::new();
/// ff.clock(false, true); // master captures d=1
/// ff.clock(true, true);  // rising edge: slave exposes it
/// assert!(ff.q);
///
/// // A held-high clock does not resample
/// ff.clock(true, false);
/// assert!(ff.q);
/// ```
#[derive(Debug, Clone)]
pub struct DFlipFlop {
    /// Stored output.
    pub q: bool,
    /// Complement output.
    pub qn: bool,
    master: DLatch,
    slave: DLatch,
}

impl DFlipFlop {
    /// Creates a flip-flop holding 0.
    pub fn new() -> Self {
        Self {
            q: false,
            qn: true,
            master: DLatch::new(),
            slave: DLatch::new(),
        }
    }

    /// Drives the clock and data inputs.
    ///
    /// The output updates only when `clk` transitions from low to high
    /// between two calls.
    pub fn clock(&mut self, clk: bool, d: bool) {
        // Master is transparent while the clock is low
        self.master.update(gates::not(clk), d);

        // Slave is transparent while the clock is high, fed by the master
        self.slave.update(clk, self.master.q);

        self.q = self.slave.q;
        self.qn = self.slave.qn;
    }
}

impl Default for DFlipFlop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_on_rising_edge() {
        let mut ff = DFlipFlop::new();

        ff.clock(false, true);
        assert!(!ff.q, "no edge yet");

        ff.clock(true, true);
        assert!(ff.q, "rising edge captures d=1");
    }

    #[test]
    fn test_no_capture_on_falling_edge() {
        let mut ff = DFlipFlop::new();

        ff.clock(false, true);
        ff.clock(true, true);
        assert!(ff.q);

        // Falling edge with d=0 must not change the output
        ff.clock(false, false);
        assert!(ff.q);
    }

    #[test]
    fn test_no_capture_while_clock_held_high() {
        let mut ff = DFlipFlop::new();

        ff.clock(false, true);
        ff.clock(true, true);
        assert!(ff.q);

        // Clock stays high; data changes are invisible
        ff.clock(true, false);
        assert!(ff.q);
        ff.clock(true, false);
        assert!(ff.q);

        // Only after a full low/high cycle does the new value appear
        ff.clock(false, false);
        ff.clock(true, false);
        assert!(!ff.q);
    }

    #[test]
    fn test_output_tracks_most_recent_edge() {
        let mut ff = DFlipFlop::new();

        for &value in &[true, false, true, true, false] {
            ff.clock(false, value);
            ff.clock(true, value);
            assert_eq!(ff.q, value);
            assert_eq!(ff.qn, !value);
        }
    }
}
