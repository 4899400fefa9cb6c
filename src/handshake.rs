//! # Byte Transfer Protocol
//!
//! This module implements the handshake used to deliver one byte to the
//! 80C49 printer controller over the parallel interface. Every public
//! operation on [`crate::Printer`] reduces to one or more runs of this
//! protocol.
//!
//! ## Phase Sequence
//!
//! ```text
//! AwaitReady → SettleAfterReady → Latch → Strobe → ReleaseStrobe → (PostDelay) → Idle
//! ```
//!
//! | Phase              | With /READY                      | Without /READY |
//! |--------------------|----------------------------------|----------------|
//! | `AwaitReady`       | poll /READY, bounded by budget   | skipped        |
//! | `SettleAfterReady` | fixed settle delay               | skipped        |
//! | `Latch`            | drive D0–D7 to the byte's bits   | same           |
//! | `Strobe`           | assert /INT, hold pulse width    | same           |
//! | `ReleaseStrobe`    | deassert /INT                    | same           |
//! | `PostDelay`        | skipped                          | fixed inter-character delay |
//!
//! ## Soft Timeout
//!
//! The ready-wait is bounded by [`timing::MAX_READY_WAIT_MS`] but its expiry
//! is *not* a failure: the transfer proceeds speculatively. The controller
//! firmware does not always assert /READY reliably, so a hard failure here
//! would wedge the driver on a quirk of the receiving side. The trade-off is
//! bounded latency over strict correctness.
//!
//! ## Bit-to-Line Mapping
//!
//! Bit `i` of the byte drives data line `data[i]` (D0 = bit 0 … D7 = bit 7).
//! This mapping is a compatibility contract with the controller firmware —
//! reordering it scrambles every character.

use crate::hal::{Level, LineId, LineIo, LineSignal};
use crate::lines::LineAssignment;
use crate::timing;

/// One phase of the byte transfer protocol.
///
/// `Idle` is both the initial and terminal state of each transfer; a call
/// to [`transfer`] walks the machine from its entry phase back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Poll /READY until asserted or the wait budget elapses.
    AwaitReady,
    /// Fixed settle delay after /READY (the controller asserts it early).
    SettleAfterReady,
    /// Drive the data lines to the byte's bits.
    Latch,
    /// Assert /INT and hold it for the strobe pulse width.
    Strobe,
    /// Deassert /INT.
    ReleaseStrobe,
    /// Fixed inter-character delay, only without /READY.
    PostDelay,
    /// No transfer in progress.
    Idle,
}

impl Phase {
    /// Entry phase for a transfer: the ready-wait phases only exist when a
    /// /READY line is wired.
    #[inline]
    pub const fn entry(has_ready: bool) -> Self {
        if has_ready {
            Phase::AwaitReady
        } else {
            Phase::Latch
        }
    }
}

/// Deliver one byte to the controller.
///
/// Blocks the caller for the whole handshake: worst case the full ready-wait
/// budget plus the settle delay and strobe pulse, typical case microseconds.
/// Never fails — see the module docs on the soft timeout.
pub fn transfer<IO: LineIo>(io: &mut IO, lines: &LineAssignment, byte: u8) {
    let mut phase = Phase::entry(lines.has_ready());
    while phase != Phase::Idle {
        phase = step(io, lines, byte, phase);
    }
}

/// Execute one phase and return the next.
fn step<IO: LineIo>(io: &mut IO, lines: &LineAssignment, byte: u8, phase: Phase) -> Phase {
    match phase {
        Phase::AwaitReady => {
            if let Some(ready) = lines.ready {
                poll_ready(io, ready);
            }
            Phase::SettleAfterReady
        }
        Phase::SettleAfterReady => {
            io.delay_us(timing::READY_SETTLE_US);
            Phase::Latch
        }
        Phase::Latch => {
            // D0 = bit 0 … D7 = bit 7. The lines keep these levels until
            // the next Latch; nothing may touch them while /INT is low.
            for (bit, &line) in lines.data.iter().enumerate() {
                io.write_level(line, Level::from_bit(byte >> bit & 1 == 1));
            }
            Phase::Strobe
        }
        Phase::Strobe => {
            io.write_level(lines.strobe, LineSignal::Asserted.level());
            io.delay_us(timing::STROBE_PULSE_US);
            Phase::ReleaseStrobe
        }
        Phase::ReleaseStrobe => {
            io.write_level(lines.strobe, LineSignal::Deasserted.level());
            if lines.has_ready() {
                Phase::Idle
            } else {
                Phase::PostDelay
            }
        }
        Phase::PostDelay => {
            io.delay_us(timing::NO_READY_CHAR_DELAY_US);
            Phase::Idle
        }
        Phase::Idle => Phase::Idle,
    }
}

/// The /READY wait-and-settle sequence, shared with
/// [`crate::Printer::form_feed`] (which pulses /PF instead of strobing a
/// byte but uses the identical entry handshake).
pub(crate) fn ready_handshake<IO: LineIo>(io: &mut IO, ready: LineId) {
    poll_ready(io, ready);
    io.delay_us(timing::READY_SETTLE_US);
}

/// Bounded /READY polling loop.
///
/// Reads the monotonic clock each iteration rather than counting a fixed
/// number of polls — the bound is wall-clock time, and poll cost varies
/// with the host.
fn poll_ready<IO: LineIo>(io: &mut IO, ready: LineId) {
    let start = io.millis();
    // /READY is active-low: high means the controller is still busy.
    while io.read_level(ready) == LineSignal::Deasserted.level() {
        if io.millis().saturating_sub(start) > u64::from(timing::MAX_READY_WAIT_MS) {
            // Soft timeout: proceed speculatively.
            break;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ReadyBehavior, SimIo, TraceEvent};
    use pretty_assertions::assert_eq;

    const READY: LineId = 10;

    fn wiring(ready: Option<LineId>) -> LineAssignment {
        LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, ready).unwrap()
    }

    #[test]
    fn test_entry_phase_selection() {
        assert_eq!(Phase::entry(true), Phase::AwaitReady);
        assert_eq!(Phase::entry(false), Phase::Latch);
    }

    #[test]
    fn test_latch_mapping_lsb_first() {
        let lines = wiring(None);
        let mut io = SimIo::new();
        transfer(&mut io, &lines, 0b1010_0001);

        assert_eq!(io.level(0), Level::High); // bit 0
        assert_eq!(io.level(1), Level::Low); // bit 1
        assert_eq!(io.level(5), Level::High); // bit 5
        assert_eq!(io.level(7), Level::High); // bit 7
        assert_eq!(io.data_byte(&lines), 0b1010_0001);
    }

    #[test]
    fn test_no_ready_transfer_sequence() {
        let lines = wiring(None);
        let mut io = SimIo::new();
        transfer(&mut io, &lines, 0xFF);

        // All data lines high, then the strobe pulse, then the fixed
        // inter-character delay. No reads anywhere on this path.
        let expected: Vec<TraceEvent> = (0..8)
            .map(|line| TraceEvent::Write {
                line,
                level: Level::High,
            })
            .chain([
                TraceEvent::Write {
                    line: 8,
                    level: Level::Low,
                },
                TraceEvent::DelayUs(timing::STROBE_PULSE_US),
                TraceEvent::Write {
                    line: 8,
                    level: Level::High,
                },
                TraceEvent::DelayUs(timing::NO_READY_CHAR_DELAY_US),
            ])
            .collect();
        assert_eq!(io.trace(), &expected[..]);
    }

    #[test]
    fn test_ready_transfer_polls_then_settles() {
        let lines = wiring(Some(READY));
        let mut io = SimIo::new();
        io.script_ready(READY, ReadyBehavior::Ready);
        transfer(&mut io, &lines, b'A');

        // First event is the /READY poll, then the settle delay.
        assert_eq!(
            io.trace()[0],
            TraceEvent::Read {
                line: READY,
                level: Level::Low,
            }
        );
        assert_eq!(io.trace()[1], TraceEvent::DelayUs(timing::READY_SETTLE_US));
        assert_eq!(io.data_byte(&lines), b'A');
    }

    #[test]
    fn test_ready_transfer_has_no_post_delay() {
        let lines = wiring(Some(READY));
        let mut io = SimIo::new();
        io.script_ready(READY, ReadyBehavior::Ready);
        transfer(&mut io, &lines, b'A');

        assert!(
            !io.trace()
                .contains(&TraceEvent::DelayUs(timing::NO_READY_CHAR_DELAY_US))
        );
    }

    #[test]
    fn test_ready_timeout_is_soft() {
        let lines = wiring(Some(READY));
        let mut io = SimIo::new();
        io.script_ready(READY, ReadyBehavior::Busy);
        transfer(&mut io, &lines, b'Z');

        // The wait saturates at the budget, then the transfer completes
        // anyway and the strobe ends up released.
        assert!(io.now_ms() >= u64::from(timing::MAX_READY_WAIT_MS));
        assert_eq!(io.data_byte(&lines), b'Z');
        assert_eq!(io.level(lines.strobe), Level::High);
    }

    #[test]
    fn test_ready_asserted_mid_wait() {
        let lines = wiring(Some(READY));
        let mut io = SimIo::new();
        io.script_ready(READY, ReadyBehavior::ReadyAfterMs(40));
        transfer(&mut io, &lines, b'Q');

        // Waited for the controller, but nowhere near the full budget.
        assert!(io.now_ms() >= 40);
        assert!(io.now_ms() < u64::from(timing::MAX_READY_WAIT_MS));
        assert_eq!(io.data_byte(&lines), b'Q');
    }
}
