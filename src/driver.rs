//! # Printer Driver
//!
//! This module provides [`Printer`], the public surface of the driver.
//! Every operation reduces to one or more byte transfers via
//! [`crate::handshake`], optionally followed by a fixed recovery delay when
//! no /READY line is wired.
//!
//! ## Operations
//!
//! | Operation        | Bytes sent       | No-/READY recovery |
//! |------------------|------------------|--------------------|
//! | [`print_line`]   | up to 13 + none  | 1× head return     |
//! | [`print_char`]   | 1                | none beyond the transfer |
//! | [`print_cr`]     | `CR` (0x0D)      | 2× head return     |
//! | [`form_feed`]    | none (/PF pulse) | 1× head return     |
//! | [`cancel_print`] | `CAN` (0x18)     | 1× head return     |
//!
//! [`print_line`]: Printer::print_line
//! [`print_char`]: Printer::print_char
//! [`print_cr`]: Printer::print_cr
//! [`form_feed`]: Printer::form_feed
//! [`cancel_print`]: Printer::cancel_print
//!
//! ## Blocking Model
//!
//! Fully synchronous: each call blocks until its handshakes and delays have
//! run, from microseconds (ready line present, controller fast) up to the
//! ready-wait budget per byte (controller stuck). Nothing is cancellable
//! once started and there is no internal queue.

use crate::error::DriverError;
use crate::hal::{LineIo, LineSignal};
use crate::handshake;
use crate::lines::LineAssignment;
use crate::timing;

// ============================================================================
// CONTROL CODES
// ============================================================================

/// CR (Carriage Return) — print the line buffer and return the head.
pub const CR: u8 = 0x0D;

/// CAN (Cancel) — discard the controller's pending line buffer.
pub const CAN: u8 = 0x18;

// ============================================================================
// DRIVER
// ============================================================================

/// # Parallel printer driver
///
/// Owns the line assignment and the digital I/O capability exclusively: no
/// other component may drive the data, strobe, or paper-feed lines while
/// this instance exists, or bytes would be corrupted mid-transfer. The
/// /READY line is only ever read.
///
/// ## Example
///
/// ```
/// use paralela::{LineAssignment, Printer};
/// use paralela::sim::{ReadyBehavior, SimIo};
///
/// let lines = LineAssignment::new([2, 3, 4, 5, 6, 7, 8, 9], 10, 11, Some(12))?;
/// let mut io = SimIo::new();
/// io.script_ready(12, ReadyBehavior::Ready);
/// let mut printer = Printer::new(io, lines)?;
///
/// let sent = printer.print_line("HELLO");
/// assert_eq!(sent, 5);
/// printer.print_cr();
/// # Ok::<(), paralela::DriverError>(())
/// ```
#[derive(Debug)]
pub struct Printer<IO: LineIo> {
    io: IO,
    lines: LineAssignment,
}

impl<IO: LineIo> Printer<IO> {
    /// Build a driver: validate the line assignment, then perform one-time
    /// line setup (data and control lines as outputs with the control lines
    /// deasserted, /READY as input when wired).
    ///
    /// ## Errors
    ///
    /// Returns [`DriverError::DuplicateLine`] if the assignment reuses a
    /// line identifier.
    pub fn new(mut io: IO, lines: LineAssignment) -> Result<Self, DriverError> {
        lines.validate()?;
        lines.setup(&mut io);
        Ok(Self { io, lines })
    }

    /// Transmit one line of text, up to [`timing::MAX_COLUMNS`] characters
    /// or a NUL terminator, whichever comes first.
    ///
    /// Excess characters are silently dropped — the only report is the
    /// returned count of characters actually transmitted. Afterward, when
    /// no /READY line is wired, waits [`timing::HEAD_RETURN_DELAY_MS`] for
    /// the printhead to return to the line start (with /READY the next
    /// transfer's ready-wait covers that).
    pub fn print_line(&mut self, text: &str) -> usize {
        let mut sent = 0;
        for &byte in text.as_bytes().iter().take(timing::MAX_COLUMNS) {
            if byte == 0 {
                break;
            }
            handshake::transfer(&mut self.io, &self.lines, byte);
            sent += 1;
        }

        if !self.lines.has_ready() {
            self.io.delay_ms(timing::HEAD_RETURN_DELAY_MS);
        }

        sent
    }

    /// Transmit exactly one byte. Any value 0x00–0xFF goes out as literal
    /// print data; no length or recovery logic beyond the transfer itself.
    pub fn print_char(&mut self, c: u8) {
        handshake::transfer(&mut self.io, &self.lines, c);
    }

    /// Transmit a carriage return ([`CR`]).
    ///
    /// Without /READY this waits twice the usual head-return delay: a
    /// partial line may have printed, and the head has further to travel
    /// than after a full line.
    pub fn print_cr(&mut self) {
        handshake::transfer(&mut self.io, &self.lines, CR);

        if !self.lines.has_ready() {
            self.io.delay_ms(2 * timing::HEAD_RETURN_DELAY_MS);
        }
    }

    /// Trigger a mechanical form feed.
    ///
    /// Runs the same ready-wait/settle entry as a byte transfer, then
    /// pulses the /PF line for [`timing::PAPER_FEED_PULSE_US`] instead of
    /// strobing data. Without /READY, waits the head-return delay after.
    pub fn form_feed(&mut self) {
        if let Some(ready) = self.lines.ready {
            handshake::ready_handshake(&mut self.io, ready);
        }

        self.io
            .write_level(self.lines.paper_feed, LineSignal::Asserted.level());
        self.io.delay_us(timing::PAPER_FEED_PULSE_US);
        self.io
            .write_level(self.lines.paper_feed, LineSignal::Deasserted.level());

        if !self.lines.has_ready() {
            self.io.delay_ms(timing::HEAD_RETURN_DELAY_MS);
        }
    }

    /// Transmit a cancel ([`CAN`]), discarding the controller's pending
    /// line. Without /READY, waits the head-return delay after.
    pub fn cancel_print(&mut self) {
        handshake::transfer(&mut self.io, &self.lines, CAN);

        if !self.lines.has_ready() {
            self.io.delay_ms(timing::HEAD_RETURN_DELAY_MS);
        }
    }

    /// The line assignment this driver was built with.
    pub fn lines(&self) -> &LineAssignment {
        &self.lines
    }

    /// Borrow the I/O capability (e.g. to inspect a simulator's trace).
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutably borrow the I/O capability (e.g. to re-script a simulated
    /// /READY line between operations).
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Tear down the driver and recover the I/O capability.
    pub fn into_io(self) -> IO {
        self.io
    }
}

// ============================================================================
// TESTS
// ============================================================================
