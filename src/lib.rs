//! Gate motion inference engine: decodes the toggle pattern of a single
//! status line into a motion state and drives the gate controller through
//! timed relay pulses.

pub mod app;
pub mod config;
pub mod hal;
pub mod svc;
