//! Response formatting
//!
//! Everything the controller prints goes through these writers so the wire
//! format is defined in one place. All lines end in CR LF.

use core::fmt::{self, Write};

use crate::tokenizer::Tokens;

/// Line terminator for every response line
pub const NEWLINE: &str = "\r\n";

/// Response to any rejected line
pub const INVALID_COMMAND: &str = "Invalid command";

/// `water` response when the current time is inside the new window
pub const WATERING_ALLOWED: &str = "Watering is Allowed";

/// `water` response when the current time is outside the new window
pub const WATERING_NOT_ALLOWED: &str = "Watering is not Allowed";

/// Values printed by the `status` command
///
/// `None` marks a metric whose measurement failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub volume_ml: Option<u32>,
    pub light_percent: Option<f32>,
    pub moisture_percent: Option<f32>,
    pub battery_volts: Option<f32>,
    pub seconds_of_day: u32,
    pub window_start_s: u32,
    pub window_end_s: u32,
}

/// Echo the raw line as received
pub fn write_echo<W: Write>(out: &mut W, line: &str) -> fmt::Result {
    write!(out, "{}{}", line, NEWLINE)
}

/// Print one row per field: kind tag, TAB, field text
pub fn write_field_table<W: Write>(out: &mut W, tokens: &Tokens<'_>) -> fmt::Result {
    for index in 0..tokens.len() {
        if let (Some(kind), Some(text)) = (tokens.kind(index), tokens.field_str(index)) {
            write!(out, "{}\t{}{}", kind.tag(), text, NEWLINE)?;
        }
    }
    Ok(())
}

/// Print a single message line
pub fn write_line<W: Write>(out: &mut W, message: &str) -> fmt::Result {
    write!(out, "{}{}", message, NEWLINE)
}

/// Print the `status` report
pub fn write_status<W: Write>(out: &mut W, report: &StatusReport) -> fmt::Result {
    match report.volume_ml {
        Some(ml) => write!(out, "Volume = {} mL{}", ml, NEWLINE)?,
        None => write!(out, "Volume = unavailable{}", NEWLINE)?,
    }
    write_percent(out, "Light Percentage", report.light_percent)?;
    write_percent(out, "Moisture Percentage", report.moisture_percent)?;
    match report.battery_volts {
        Some(v) => write!(out, "Battery Voltage: {:.2} Volts{}", v, NEWLINE)?,
        None => write!(out, "Battery Voltage: unavailable{}", NEWLINE)?,
    }
    write!(out, "Current Seconds = {} sec{}", report.seconds_of_day, NEWLINE)?;
    write!(
        out,
        "Watering Window = {} sec\t{} sec{}",
        report.window_start_s, report.window_end_s, NEWLINE
    )
}

fn write_percent<W: Write>(out: &mut W, label: &str, value: Option<f32>) -> fmt::Result {
    match value {
        Some(p) => write!(out, "{}: {:.2} percent{}", label, p, NEWLINE),
        None => write!(out, "{}: unavailable{}", label, NEWLINE),
    }
}
