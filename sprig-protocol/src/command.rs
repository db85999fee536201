//! Command grammar
//!
//! Matches a tokenized line against the known keywords and validates the
//! arguments. Matching is first-match-wins in [`COMMANDS`] order: once a
//! keyword matches, a failed argument check rejects the line instead of
//! trying later entries.

use crate::tokenizer::Tokens;

/// Keywords and their minimum argument counts, in match order
pub const COMMANDS: &[(&str, usize)] = &[
    ("alert", 1),
    ("status", 0),
    ("pump", 0),
    ("time", 2),
    ("water", 4),
    ("level", 1),
];

/// Seconds in one day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Pump switch argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    On,
    Off,
}

/// Hours and minutes past midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting hours ≥ 24 or minutes ≥ 60
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self {
                hours: hours as u8,
                minutes: minutes as u8,
            })
        } else {
            None
        }
    }

    /// Seconds past midnight
    pub fn as_seconds(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60
    }
}

/// A validated operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set the light alert threshold and evaluate alerts now
    Alert { light_percent: u8 },
    /// Report all metrics, the clock and the schedule window
    Status,
    /// Switch the pump
    Pump(Switch),
    /// Load the real-time clock
    SetTime(TimeOfDay),
    /// Set the watering window
    Water { start: TimeOfDay, end: TimeOfDay },
    /// Set the moisture cutoff
    Level { moisture_percent: u8 },
}

/// Reasons a line is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// The line had no fields
    Empty,
    /// The keyword is not a known command
    Unknown,
    /// Fewer arguments than the command requires
    MissingArguments,
    /// An argument is missing, non-numeric or out of range
    InvalidArgument,
}

impl Command {
    /// Match and validate a tokenized line
    pub fn parse(tokens: &Tokens<'_>) -> Result<Self, CommandError> {
        let keyword = tokens.field_str(0).ok_or(CommandError::Empty)?;

        let &(name, _) = COMMANDS
            .iter()
            .find(|(name, min_args)| tokens.is_command(name, *min_args))
            .ok_or_else(|| {
                if COMMANDS.iter().any(|(name, _)| *name == keyword) {
                    CommandError::MissingArguments
                } else {
                    CommandError::Unknown
                }
            })?;

        match name {
            "alert" => Ok(Command::Alert {
                light_percent: percent(tokens, 1)?,
            }),
            "status" => Ok(Command::Status),
            "pump" => match tokens.field_str(1) {
                Some("ON") => Ok(Command::Pump(Switch::On)),
                Some("OFF") => Ok(Command::Pump(Switch::Off)),
                _ => Err(CommandError::InvalidArgument),
            },
            "time" => Ok(Command::SetTime(time_of_day(tokens, 1)?)),
            "water" => Ok(Command::Water {
                start: time_of_day(tokens, 1)?,
                end: time_of_day(tokens, 3)?,
            }),
            "level" => Ok(Command::Level {
                moisture_percent: percent(tokens, 1)?,
            }),
            _ => Err(CommandError::Unknown),
        }
    }
}

fn integer(tokens: &Tokens<'_>, index: usize) -> Result<u32, CommandError> {
    tokens
        .field_integer(index)
        .ok_or(CommandError::InvalidArgument)
}

fn percent(tokens: &Tokens<'_>, index: usize) -> Result<u8, CommandError> {
    let value = integer(tokens, index)?;
    if value > 100 {
        return Err(CommandError::InvalidArgument);
    }
    Ok(value as u8)
}

fn time_of_day(tokens: &Tokens<'_>, index: usize) -> Result<TimeOfDay, CommandError> {
    let hours = integer(tokens, index)?;
    let minutes = integer(tokens, index + 1)?;
    TimeOfDay::new(hours, minutes).ok_or(CommandError::InvalidArgument)
}
