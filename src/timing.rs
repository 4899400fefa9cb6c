//! # Timing Constants
//!
//! Handshake pacing for the 80C49 printer controller. The host runs much
//! faster than the 80C49, so every edge the driver produces needs to be held
//! or spaced long enough for the controller's polling loops to see it.
//!
//! Two groups of constants:
//!
//! - **Handshake timing**: used on every transfer regardless of wiring.
//! - **No-/READY timing**: fixed pacing used only when the driver is wired
//!   without a /READY line and has no flow control at all.
//!
//! ## The /READY Quirk
//!
//! The 80C49 firmware asserts /READY slightly *before* it has finished its
//! own internal setup. Changing the data lines immediately after observing
//! /READY corrupts the transfer, which is why [`READY_SETTLE_US`] exists at
//! all. See [`crate::handshake`] for where each constant is applied.

/// Maximum time to wait for /READY before proceeding anyway (ms).
///
/// This is a soft bound: when it elapses the transfer continues
/// speculatively rather than failing. The controller does not always assert
/// /READY reliably, so a hard failure here would make the driver unusable.
pub const MAX_READY_WAIT_MS: u32 = 1000;

/// Settle time after /READY is observed, before touching any line (µs).
///
/// Compensates for the controller asserting /READY before it is truly
/// ready (see module docs).
pub const READY_SETTLE_US: u32 = 200;

/// Width of the /INT strobe pulse (µs).
///
/// Long enough for the 80C49's polling loop to detect the edge, short
/// enough not to stall the caller.
pub const STROBE_PULSE_US: u32 = 10;

/// Width of the /PF paper-feed pulse (µs).
///
/// The feed request is level-sensed over a slower path than the strobe, so
/// this pulse is deliberately wider than [`STROBE_PULSE_US`].
pub const PAPER_FEED_PULSE_US: u32 = 200;

/// Inter-character delay when no /READY line is wired (µs).
///
/// Without flow control the driver has to assume the controller needs this
/// long to consume each byte before the next strobe.
pub const NO_READY_CHAR_DELAY_US: u32 = 700;

/// Printhead return time after a line, form feed, or cancel (ms).
///
/// Only applied when no /READY line is wired — with /READY present the next
/// transfer's ready-wait covers the mechanical recovery naturally.
/// [`crate::Printer::print_cr`] applies twice this value, since a partial
/// line leaves the head mid-travel.
pub const HEAD_RETURN_DELAY_MS: u32 = 1800;

/// Number of printable columns per line.
///
/// Characters beyond this are silently dropped by
/// [`crate::Printer::print_line`] and reported only through the returned
/// count.
pub const MAX_COLUMNS: usize = 13;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_feed_pulse_wider_than_strobe() {
        assert!(PAPER_FEED_PULSE_US > STROBE_PULSE_US);
    }

    #[test]
    fn test_settle_shorter_than_ready_budget() {
        // Settle is µs, budget is ms — settle must be negligible next to it.
        assert!(u64::from(READY_SETTLE_US) < u64::from(MAX_READY_WAIT_MS) * 1000);
    }
}
