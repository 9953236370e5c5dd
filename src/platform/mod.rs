//! Platform layer
//!
//! Handles everything the deterministic core leaves out:
//! - Wall-clock countdown ticks
//! - Narrative requests in flight
//! - Snapshot publishing to a presentation layer
//! - The headless autopilot demo

pub mod demo;
pub mod driver;

pub use demo::run_autopilot;
pub use driver::{GameHandle, spawn};
