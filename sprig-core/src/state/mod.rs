//! Control-loop state machine
//!
//! One state is active at a time. The loop starts every iteration in
//! `Idle` and chooses between interactive command handling and autonomous
//! monitoring based on whether serial input is waiting.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
