//! Serial Command Protocol
//!
//! Line-oriented ASCII protocol spoken between an operator terminal and the
//! watering controller. Lines are terminated by CR and echoed back, followed
//! by a diagnostic field table and the command's response.
//!
//! # Pipeline
//! ```text
//! bytes ──► InputLine ──► Tokens (FieldTable) ──► Command ──► response
//!          (line.rs)      (tokenizer.rs)          (command.rs) (response.rs)
//! ```
//!
//! Tokenizing is in place: delimiter bytes are overwritten with NUL so each
//! field is independently terminated inside the line buffer, and field text
//! is borrowed from the line rather than copied to a shared buffer.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod response;
pub mod tokenizer;

pub use command::{Command, CommandError, Switch, TimeOfDay, SECONDS_PER_DAY};
pub use line::{InputLine, LineEvent, MAX_CHARS};
pub use response::StatusReport;
pub use tokenizer::{Field, FieldKind, FieldTable, Tokens, MAX_FIELDS};
