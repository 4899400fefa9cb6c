//! # Error Types
//!
//! This module defines the error type for the driver.
//!
//! The error surface is deliberately tiny: only construction can fail.
//! Runtime operations never return errors — a ready-wait timeout is
//! tolerated silently and line truncation is reported only through the
//! transmitted-character count.

use thiserror::Error;

use crate::hal::LineId;

/// Main error type for driver construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The same line identifier was assigned to more than one role
    /// (data, strobe, paper feed, or ready).
    #[error("line {0} is assigned to more than one role")]
    DuplicateLine(LineId),
}
