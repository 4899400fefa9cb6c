//! # Paralela CLI
//!
//! Runs driver operations against the built-in simulator and reports what
//! happened on the wires — handy for inspecting handshake behavior without
//! a printer attached.
//!
//! ## Usage
//!
//! ```bash
//! # Transmit a line (13-column limit applies) and show the summary
//! paralela line "HELLO WORLD"
//!
//! # Same, with the full line-activity trace
//! paralela --trace line "HELLO WORLD"
//!
//! # Single byte: decimal, hex, or a literal character
//! paralela char 0x2A
//! paralela char '*'
//!
//! # Control operations
//! paralela cr
//! paralela form-feed
//! paralela cancel
//!
//! # Without a /READY line (fixed pacing delays instead of handshake)
//! paralela --no-ready line "HELLO"
//!
//! # Controller that takes 40 virtual ms to become ready
//! paralela --ready-after-ms 40 char 'A'
//!
//! # Controller that never becomes ready (soft timeout path)
//! paralela --busy char 'A'
//! ```

use clap::{Parser, Subcommand};

use paralela::sim::{ReadyBehavior, SimIo};
use paralela::{DriverError, LineAssignment, Printer};

// Demo wiring, matching the library's documented examples.
const DATA_LINES: [u8; 8] = [2, 3, 4, 5, 6, 7, 8, 9];
const STROBE_LINE: u8 = 10;
const PAPER_FEED_LINE: u8 = 11;
const READY_LINE: u8 = 12;

/// Paralela - parallel printer driver, simulated dry-run
#[derive(Parser, Debug)]
#[command(name = "paralela")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run without a /READY line (fixed pacing delays)
    #[arg(long)]
    no_ready: bool,

    /// Controller asserts /READY after this many virtual milliseconds
    #[arg(long, value_name = "MS", conflicts_with = "no_ready")]
    ready_after_ms: Option<u64>,

    /// Controller never asserts /READY (exercises the soft timeout)
    #[arg(long, conflicts_with_all = ["no_ready", "ready_after_ms"])]
    busy: bool,

    /// Dump the full line-activity trace
    #[arg(long)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transmit one line of text (up to 13 columns)
    Line {
        /// Text to transmit; characters beyond column 13 are dropped
        text: String,
    },
    /// Transmit a single byte (decimal, 0x-hex, or a literal character)
    Char {
        /// Byte value, e.g. 65, 0x41, or A
        byte: String,
    },
    /// Transmit a carriage return (0x0D)
    Cr,
    /// Pulse the paper-feed line
    FormFeed,
    /// Transmit a cancel (0x18)
    Cancel,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let ready = if cli.no_ready { None } else { Some(READY_LINE) };
    let lines = LineAssignment::new(DATA_LINES, STROBE_LINE, PAPER_FEED_LINE, ready)
        .map_err(|e: DriverError| e.to_string())?;

    let mut io = SimIo::new();
    if ready.is_some() {
        let behavior = if cli.busy {
            ReadyBehavior::Busy
        } else if let Some(ms) = cli.ready_after_ms {
            ReadyBehavior::ReadyAfterMs(ms)
        } else {
            ReadyBehavior::Ready
        };
        io.script_ready(READY_LINE, behavior);
    }

    let mut printer = Printer::new(io, lines).map_err(|e| e.to_string())?;
    printer.io_mut().clear_trace();

    match &cli.command {
        Commands::Line { text } => {
            let sent = printer.print_line(text);
            println!("transmitted {} of {} characters", sent, text.len());
        }
        Commands::Char { byte } => {
            let value = parse_byte(byte)?;
            printer.print_char(value);
            println!("transmitted byte 0x{:02X}", value);
        }
        Commands::Cr => {
            printer.print_cr();
            println!("transmitted carriage return");
        }
        Commands::FormFeed => {
            printer.form_feed();
            println!("pulsed paper feed");
        }
        Commands::Cancel => {
            printer.cancel_print();
            println!("transmitted cancel");
        }
    }

    let io = printer.into_io();
    println!(
        "strobe pulses: {}, ready polls: {}, elapsed: {} ms (virtual)",
        io.pulse_count(STROBE_LINE),
        io.reads_of(READY_LINE),
        io.now_ms()
    );

    if cli.trace {
        println!();
        for event in io.trace() {
            println!("  {}", event);
        }
    }

    Ok(())
}

/// Parse a byte argument: `"0x41"`, `"65"`, or a single character `"A"`.
fn parse_byte(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).map_err(|_| format!("invalid hex byte: {}", s));
    }
    if let Ok(value) = s.parse::<u8>() {
        return Ok(value);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("invalid byte: {} (use decimal, 0x-hex, or one ASCII character)", s)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
