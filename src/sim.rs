//! # Simulated I/O Backend
//!
//! A [`LineIo`] implementation with simulated line states and a virtual
//! clock, so the handshake protocol can be exercised without hardware —
//! both by the test suite and by the CLI's trace mode.
//!
//! ## Virtual Time
//!
//! Time only advances when the driver spends it:
//!
//! - `delay_ms`/`delay_us` advance the clock by exactly the requested
//!   amount (microseconds accumulate; 1000 µs = 1 ms);
//! - every `read_level` costs [`POLL_COST_US`], so a bounded ready-wait
//!   loop makes progress against its budget instead of spinning forever.
//!
//! ## Scripted /READY
//!
//! The ready line is driven by a [`ReadyBehavior`] script instead of a
//! stored level; every other input reads back whatever was last written,
//! or high (pulled up) if never written.
//!
//! ## Event Trace
//!
//! Every configure, write, read, and delay is recorded as a [`TraceEvent`]
//! in order, which is what the tests assert against.

use std::fmt;

use crate::hal::{Level, LineId, LineIo};
use crate::lines::LineAssignment;

/// Virtual cost of one `read_level` poll (µs).
pub const POLL_COST_US: u64 = 1000;

/// One recorded I/O action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A line was configured as an output.
    ConfigureOutput(LineId),
    /// A line was configured as an input.
    ConfigureInput(LineId),
    /// A level was driven onto a line.
    Write { line: LineId, level: Level },
    /// A line was sampled, and what it read.
    Read { line: LineId, level: Level },
    /// A millisecond busy-wait.
    DelayMs(u32),
    /// A microsecond busy-wait.
    DelayUs(u32),
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_name = |level: Level| match level {
            Level::Low => "low",
            Level::High => "high",
        };
        match self {
            TraceEvent::ConfigureOutput(line) => write!(f, "configure line {line} as output"),
            TraceEvent::ConfigureInput(line) => write!(f, "configure line {line} as input"),
            TraceEvent::Write { line, level } => {
                write!(f, "write line {line} {}", level_name(*level))
            }
            TraceEvent::Read { line, level } => {
                write!(f, "read  line {line} -> {}", level_name(*level))
            }
            TraceEvent::DelayMs(ms) => write!(f, "delay {ms} ms"),
            TraceEvent::DelayUs(us) => write!(f, "delay {us} us"),
        }
    }
}

/// Script for the simulated /READY line (active-low: ready = low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyBehavior {
    /// Controller is always ready.
    #[default]
    Ready,
    /// Controller never becomes ready — every wait saturates its budget.
    Busy,
    /// Controller asserts /READY once the virtual clock reaches this many
    /// milliseconds.
    ReadyAfterMs(u64),
}

/// # Simulated digital I/O
///
/// ## Example
///
/// ```
/// use paralela::hal::{Level, LineIo};
/// use paralela::sim::SimIo;
///
/// let mut io = SimIo::new();
/// io.write_level(3, Level::Low);
/// assert_eq!(io.level(3), Level::Low);
/// io.delay_ms(5);
/// assert_eq!(io.now_ms(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct SimIo {
    levels: [Level; 256],
    now_us: u64,
    ready_line: Option<LineId>,
    ready: ReadyBehavior,
    trace: Vec<TraceEvent>,
}

impl SimIo {
    /// New simulator: clock at zero, all lines floating high.
    pub fn new() -> Self {
        Self {
            levels: [Level::High; 256],
            now_us: 0,
            ready_line: None,
            ready: ReadyBehavior::default(),
            trace: Vec::new(),
        }
    }

    /// Attach a /READY script to a line. Reads of that line follow the
    /// script instead of the stored level.
    pub fn script_ready(&mut self, line: LineId, behavior: ReadyBehavior) {
        self.ready_line = Some(line);
        self.ready = behavior;
    }

    /// Virtual clock, milliseconds.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_us / 1000
    }

    /// Virtual clock, microseconds.
    #[inline]
    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Current level of a line (last written, or high if never written).
    #[inline]
    pub fn level(&self, line: LineId) -> Level {
        self.levels[line as usize]
    }

    /// The recorded event trace, in order.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Drop all recorded events (the clock keeps running). Useful to
    /// discard construction-time setup before asserting on an operation.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Reconstruct the byte currently held on the data lines
    /// (D0 = bit 0 … D7 = bit 7).
    pub fn data_byte(&self, lines: &LineAssignment) -> u8 {
        lines
            .data
            .iter()
            .enumerate()
            .fold(0u8, |byte, (bit, &line)| {
                byte | (self.level(line).bit() << bit)
            })
    }

    /// Every level written to a line, in order.
    pub fn writes_to(&self, line: LineId) -> Vec<Level> {
        self.trace
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Write { line: l, level } if *l == line => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Number of times a line was sampled.
    pub fn reads_of(&self, line: LineId) -> usize {
        self.trace
            .iter()
            .filter(|event| matches!(event, TraceEvent::Read { line: l, .. } if *l == line))
            .count()
    }

    /// Number of low-going pulses driven onto an active-low line.
    pub fn pulse_count(&self, line: LineId) -> usize {
        self.writes_to(line)
            .iter()
            .filter(|&&level| level == Level::Low)
            .count()
    }

    fn ready_level(&self) -> Level {
        match self.ready {
            ReadyBehavior::Ready => Level::Low,
            ReadyBehavior::Busy => Level::High,
            ReadyBehavior::ReadyAfterMs(ms) => {
                if self.now_ms() >= ms {
                    Level::Low
                } else {
                    Level::High
                }
            }
        }
    }
}

impl Default for SimIo {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIo for SimIo {
    fn configure_output(&mut self, line: LineId) {
        self.trace.push(TraceEvent::ConfigureOutput(line));
    }

    fn configure_input(&mut self, line: LineId) {
        self.trace.push(TraceEvent::ConfigureInput(line));
    }

    fn write_level(&mut self, line: LineId, level: Level) {
        self.levels[line as usize] = level;
        self.trace.push(TraceEvent::Write { line, level });
    }

    fn read_level(&mut self, line: LineId) -> Level {
        let level = if self.ready_line == Some(line) {
            self.ready_level()
        } else {
            self.level(line)
        };
        self.trace.push(TraceEvent::Read { line, level });
        // Sampling costs time, so bounded polling loops terminate.
        self.now_us += POLL_COST_US;
        level
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_us += u64::from(ms) * 1000;
        self.trace.push(TraceEvent::DelayMs(ms));
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us += u64::from(us);
        self.trace.push(TraceEvent::DelayUs(us));
    }

    fn millis(&mut self) -> u64 {
        self.now_ms()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates_microseconds() {
        let mut io = SimIo::new();
        io.delay_us(600);
        assert_eq!(io.now_ms(), 0);
        io.delay_us(600);
        assert_eq!(io.now_ms(), 1);
        io.delay_ms(3);
        assert_eq!(io.now_ms(), 4);
        assert_eq!(io.now_us(), 4200);
    }

    #[test]
    fn test_unwritten_lines_float_high() {
        let io = SimIo::new();
        assert_eq!(io.level(0), Level::High);
        assert_eq!(io.level(255), Level::High);
    }

    #[test]
    fn test_reads_cost_time() {
        let mut io = SimIo::new();
        io.read_level(4);
        io.read_level(4);
        assert_eq!(io.now_us(), 2 * POLL_COST_US);
        assert_eq!(io.reads_of(4), 2);
    }

    #[test]
    fn test_ready_after_ms_script() {
        let mut io = SimIo::new();
        io.script_ready(10, ReadyBehavior::ReadyAfterMs(2));
        assert_eq!(io.read_level(10), Level::High); // t=0
        assert_eq!(io.read_level(10), Level::High); // t=1
        assert_eq!(io.read_level(10), Level::Low); // t=2
    }

    #[test]
    fn test_data_byte_reconstruction() {
        let lines = LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, None).unwrap();
        let mut io = SimIo::new();
        io.write_level(0, Level::High);
        io.write_level(1, Level::Low);
        io.write_level(2, Level::High);
        for line in 3..8 {
            io.write_level(line, Level::Low);
        }
        assert_eq!(io.data_byte(&lines), 0b0000_0101);
    }

    #[test]
    fn test_pulse_count() {
        let mut io = SimIo::new();
        io.write_level(8, Level::Low);
        io.write_level(8, Level::High);
        io.write_level(8, Level::Low);
        io.write_level(8, Level::High);
        assert_eq!(io.pulse_count(8), 2);
        assert_eq!(io.writes_to(8).len(), 4);
    }
}
