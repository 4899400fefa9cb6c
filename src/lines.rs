//! # Line Assignment
//!
//! This module defines which host lines are wired to which role on the
//! printer interface, and performs the one-time direction setup.
//!
//! ## Interface Wiring
//!
//! | Role        | Count | Direction | Active |
//! |-------------|-------|-----------|--------|
//! | Data D0–D7  | 8     | output    | high = bit 1 |
//! | /INT strobe | 1     | output    | low    |
//! | /PF feed    | 1     | output    | low    |
//! | /READY      | 0..1  | input     | low    |
//!
//! The /READY line is optional: leaving it out saves a host pin and trades
//! handshake flow control for fixed pacing delays (see [`crate::timing`]).
//! Absence is expressed as `ready: None` — there is no reserved sentinel
//! value, so "handshake available" vs. "no handshake" is visible in the
//! type.

use crate::error::DriverError;
use crate::hal::{LineId, LineIo, LineSignal};

/// # Line Assignment
///
/// Immutable record of the host lines wired to the printer interface.
/// Created once at driver construction and never mutated afterwards.
///
/// ## Example
///
/// ```
/// use paralela::LineAssignment;
///
/// // Eight data lines, strobe, paper feed, and a /READY input.
/// let lines = LineAssignment::new([2, 3, 4, 5, 6, 7, 8, 9], 10, 11, Some(12))?;
/// assert!(lines.has_ready());
///
/// // Same wiring without /READY — the driver falls back to fixed pacing.
/// let lines = LineAssignment::new([2, 3, 4, 5, 6, 7, 8, 9], 10, 11, None)?;
/// assert!(!lines.has_ready());
/// # Ok::<(), paralela::DriverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAssignment {
    /// Data output lines, `data[i]` carries bit `i` of each byte.
    pub data: [LineId; 8],
    /// /INT strobe output line (active-low).
    pub strobe: LineId,
    /// /PF paper-feed output line (active-low).
    pub paper_feed: LineId,
    /// /READY input line (active-low), or `None` when not wired.
    pub ready: Option<LineId>,
}

impl LineAssignment {
    /// Build and validate a line assignment.
    ///
    /// ## Errors
    ///
    /// Returns [`DriverError::DuplicateLine`] if any identifier is used for
    /// more than one role.
    pub fn new(
        data: [LineId; 8],
        strobe: LineId,
        paper_feed: LineId,
        ready: Option<LineId>,
    ) -> Result<Self, DriverError> {
        let assignment = Self {
            data,
            strobe,
            paper_feed,
            ready,
        };
        assignment.validate()?;
        Ok(assignment)
    }

    /// Check that every assigned line identifier is distinct.
    pub fn validate(&self) -> Result<(), DriverError> {
        let mut seen = [false; 256];
        for line in self.all_lines() {
            if seen[line as usize] {
                return Err(DriverError::DuplicateLine(line));
            }
            seen[line as usize] = true;
        }
        Ok(())
    }

    /// Whether a /READY line is wired (handshake mode vs. fixed pacing).
    #[inline]
    pub fn has_ready(&self) -> bool {
        self.ready.is_some()
    }

    /// Every assigned line, data lines first.
    fn all_lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.data
            .iter()
            .copied()
            .chain([self.strobe, self.paper_feed])
            .chain(self.ready)
    }

    /// One-time direction setup.
    ///
    /// Data lines are configured as outputs without an initial value — the
    /// controller only latches them while the strobe is asserted. The
    /// strobe and paper-feed lines are driven inactive (high) *before*
    /// being switched to output, so the controller never sees a spurious
    /// assertion during setup.
    pub(crate) fn setup<IO: LineIo>(&self, io: &mut IO) {
        for &line in &self.data {
            io.configure_output(line);
        }

        io.write_level(self.strobe, LineSignal::Deasserted.level());
        io.configure_output(self.strobe);

        io.write_level(self.paper_feed, LineSignal::Deasserted.level());
        io.configure_output(self.paper_feed);

        if let Some(ready) = self.ready {
            io.configure_input(ready);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::Level;
    use crate::sim::{SimIo, TraceEvent};

    fn wiring(ready: Option<LineId>) -> LineAssignment {
        LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, ready).unwrap()
    }

    #[test]
    fn test_distinct_lines_accepted() {
        assert!(LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, Some(10)).is_ok());
        assert!(LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, None).is_ok());
    }

    #[test]
    fn test_duplicate_data_line_rejected() {
        let err = LineAssignment::new([0, 0, 2, 3, 4, 5, 6, 7], 8, 9, None).unwrap_err();
        assert_eq!(err, DriverError::DuplicateLine(0));
    }

    #[test]
    fn test_strobe_clash_rejected() {
        let err = LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 7, 9, None).unwrap_err();
        assert_eq!(err, DriverError::DuplicateLine(7));
    }

    #[test]
    fn test_ready_clash_rejected() {
        let err = LineAssignment::new([0, 1, 2, 3, 4, 5, 6, 7], 8, 9, Some(9)).unwrap_err();
        assert_eq!(err, DriverError::DuplicateLine(9));
    }

    #[test]
    fn test_setup_directions() {
        let lines = wiring(Some(10));
        let mut io = SimIo::new();
        lines.setup(&mut io);

        for line in 0..8 {
            assert!(io.trace().contains(&TraceEvent::ConfigureOutput(line)));
        }
        assert!(io.trace().contains(&TraceEvent::ConfigureOutput(8)));
        assert!(io.trace().contains(&TraceEvent::ConfigureOutput(9)));
        assert!(io.trace().contains(&TraceEvent::ConfigureInput(10)));
    }

    #[test]
    fn test_setup_deasserts_before_output_config() {
        // The inactive level must land before the direction switch for both
        // control lines, or the controller could see a glitch assertion.
        let lines = wiring(None);
        let mut io = SimIo::new();
        lines.setup(&mut io);

        let trace = io.trace();
        for line in [lines.strobe, lines.paper_feed] {
            let write = trace
                .iter()
                .position(|e| {
                    *e == TraceEvent::Write {
                        line,
                        level: Level::High,
                    }
                })
                .unwrap();
            let configure = trace
                .iter()
                .position(|e| *e == TraceEvent::ConfigureOutput(line))
                .unwrap();
            assert!(write < configure);
        }
    }

    #[test]
    fn test_setup_without_ready_configures_no_input() {
        let lines = wiring(None);
        let mut io = SimIo::new();
        lines.setup(&mut io);

        assert!(
            !io.trace()
                .iter()
                .any(|e| matches!(e, TraceEvent::ConfigureInput(_)))
        );
    }
}
