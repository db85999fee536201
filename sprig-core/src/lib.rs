//! Board-agnostic core logic for the plant-watering firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Metric engine (volume time-of-flight, light, moisture, battery)
//! - Alert tone sequences
//! - Watering schedule window
//! - Settings persistence
//! - Control-loop state machine and the controller itself
//!
//! Hardware is reached only through the capability traits of `sprig-hal`,
//! bundled per board by [`traits::Board`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alert;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod schedule;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
