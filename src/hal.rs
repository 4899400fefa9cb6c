//! # Digital I/O Capability
//!
//! This module defines the abstract digital I/O capability the driver is
//! built against. The handshake protocol only ever manipulates logical line
//! states and delays through this trait, so it can run against real GPIO on
//! a microcontroller or against the [`crate::sim`] backend on a host.
//!
//! ## Active-Low Convention
//!
//! All control lines on the printer interface (/INT strobe, /PF paper feed,
//! /READY) are active-low: the *asserted* state corresponds to a *low*
//! electrical level. [`LineSignal`] captures this mapping so protocol code
//! can say what it means ("assert the strobe") instead of which voltage it
//! wants.
//!
//! The eight data lines are **not** active-low: a data bit of 1 drives the
//! line high.

/// A host pin/line identifier.
///
/// The driver treats these as opaque — it never does arithmetic on them,
/// only passes them back to the [`LineIo`] capability.
pub type LineId = u8;

// ============================================================================
// LOGIC LEVELS
// ============================================================================

/// Physical logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low electrical level (0)
    Low,
    /// High electrical level (1)
    High,
}

impl Level {
    /// Level for a single data bit: 1 drives high, 0 drives low.
    #[inline]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Level::High } else { Level::Low }
    }

    /// The bit value carried by this level (high = 1).
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Logical state of an active-low control line.
///
/// | Signal       | Level |
/// |--------------|-------|
/// | `Asserted`   | Low   |
/// | `Deasserted` | High  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSignal {
    /// The line is active ("data valid", "ready", "feed now").
    Asserted,
    /// The line is inactive.
    Deasserted,
}

impl LineSignal {
    /// Physical level for this signal under the active-low convention.
    #[inline]
    pub const fn level(self) -> Level {
        match self {
            LineSignal::Asserted => Level::Low,
            LineSignal::Deasserted => Level::High,
        }
    }

    /// Interpret a physical level read from an active-low line.
    #[inline]
    pub const fn from_level(level: Level) -> Self {
        match level {
            Level::Low => LineSignal::Asserted,
            Level::High => LineSignal::Deasserted,
        }
    }
}

// ============================================================================
// I/O CAPABILITY TRAIT
// ============================================================================

/// # Digital I/O capability
///
/// Everything the driver needs from the host: line direction configuration,
/// level reads/writes, busy-wait delays, and a monotonic millisecond clock.
///
/// All methods are infallible by contract — electrical faults, debouncing,
/// and pin multiplexing are the host's responsibility, not the driver's.
/// See the construction contract on [`crate::Printer::new`] for which lines
/// get configured in which direction.
pub trait LineIo {
    /// Configure a line as a push-pull output.
    fn configure_output(&mut self, line: LineId);

    /// Configure a line as an input.
    fn configure_input(&mut self, line: LineId);

    /// Drive an output line to a level.
    fn write_level(&mut self, line: LineId, level: Level);

    /// Sample the current level of an input line.
    fn read_level(&mut self, line: LineId) -> Level;

    /// Busy-wait for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Busy-wait for `us` microseconds.
    fn delay_us(&mut self, us: u32);

    /// Monotonic clock in milliseconds. Only differences are meaningful.
    fn millis(&mut self) -> u64;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_bit() {
        assert_eq!(Level::from_bit(true), Level::High);
        assert_eq!(Level::from_bit(false), Level::Low);
    }

    #[test]
    fn test_level_bit_roundtrip() {
        assert_eq!(Level::High.bit(), 1);
        assert_eq!(Level::Low.bit(), 0);
        assert_eq!(Level::from_bit(Level::High.bit() == 1), Level::High);
        assert_eq!(Level::from_bit(Level::Low.bit() == 1), Level::Low);
    }

    #[test]
    fn test_active_low_mapping() {
        // Control lines are active-low: asserted drives low.
        assert_eq!(LineSignal::Asserted.level(), Level::Low);
        assert_eq!(LineSignal::Deasserted.level(), Level::High);
    }

    #[test]
    fn test_signal_from_level() {
        assert_eq!(LineSignal::from_level(Level::Low), LineSignal::Asserted);
        assert_eq!(LineSignal::from_level(Level::High), LineSignal::Deasserted);
    }
}
