//! # Paralela - Parallel Printer Driver
//!
//! Paralela drives a Seiko MTP-102 thermal printer mechanism through an
//! 80C49 control processor, over a byte-wide parallel interface built from
//! discrete digital I/O lines (8 data lines, a strobe, a paper-feed line,
//! and an optional /READY input). It provides:
//!
//! - **Handshake protocol**: latch a byte onto the data lines, strobe it
//!   into the controller, and cope with a /READY signal that is asserted
//!   slightly before the controller is actually ready
//! - **Print operations**: line, single character, carriage return, form
//!   feed, cancel
//! - **I/O abstraction**: a small capability trait so the protocol runs on
//!   real GPIO or on the built-in simulator
//!
//! ## Quick Start
//!
//! ```
//! use paralela::{LineAssignment, Printer};
//! use paralela::sim::{ReadyBehavior, SimIo};
//!
//! // Wiring: D0–D7 on lines 2–9, strobe on 10, paper feed on 11,
//! // /READY on 12. Pass `None` for /READY to use fixed pacing instead.
//! let lines = LineAssignment::new([2, 3, 4, 5, 6, 7, 8, 9], 10, 11, Some(12))?;
//!
//! // Any `LineIo` implementation works; here, the simulator.
//! let mut io = SimIo::new();
//! io.script_ready(12, ReadyBehavior::Ready);
//!
//! let mut printer = Printer::new(io, lines)?;
//!
//! // 13 columns per line; excess characters are dropped, and the count
//! // actually transmitted is returned.
//! let sent = printer.print_line("TOTAL   12.50");
//! assert_eq!(sent, 13);
//! printer.print_cr();
//! printer.form_feed();
//! # Ok::<(), paralela::DriverError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Public print operations |
//! | [`handshake`] | Byte transfer protocol |
//! | [`lines`] | Line assignment and setup |
//! | [`timing`] | Handshake timing constants |
//! | [`hal`] | Digital I/O capability trait |
//! | [`sim`] | Simulated backend for tests and traces |
//! | [`error`] | Error types |
//!
//! ## Failure Model
//!
//! Deliberately minimal: a ready-wait timeout is tolerated silently (the
//! transfer proceeds speculatively, trading strict correctness for bounded
//! latency — the controller firmware does not always assert /READY
//! reliably), and line truncation is visible only through the count
//! returned by [`Printer::print_line`]. Only construction can fail.

pub mod driver;
pub mod error;
pub mod hal;
pub mod handshake;
pub mod lines;
pub mod sim;
pub mod timing;

// Re-exports for convenience
pub use driver::Printer;
pub use error::DriverError;
pub use hal::{Level, LineId, LineIo, LineSignal};
pub use lines::LineAssignment;
