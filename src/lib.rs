#![cfg_attr(not(test), no_std)]

//! Automatic low-beam headlight and ignition controller.
//!
//! The controller is a single owned value advanced once per fixed-period
//! tick: the ignition button is debounced into release events, the ignition
//! state follows those events and seat occupancy, and the low beams follow
//! the selector switch or, in Auto, the ambient light with dwell-time
//! hysteresis. Nothing here touches hardware or time directly, so the same
//! code runs on the RP2040 and in host tests.

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod debouncer;
pub mod headlight;
pub mod ignition;

pub use config::{Config, ConfigError};
pub use controller::{Controller, ControllerIo, Inputs, Outputs, run_tick};
pub use headlight::HeadlightMode;
