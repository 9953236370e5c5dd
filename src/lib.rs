//! Burger Stack - a timed burger stacking game
//!
//! Core modules:
//! - `sim`: Deterministic game core (catalog, orders, stack editing, session state machine)
//! - `highscores`: Top-five score table
//! - `narrative`: Flavor text for level results, with fixed fallbacks
//! - `platform`: Async host that drives a session in real time
//! - `settings`: Runtime configuration

pub mod highscores;
pub mod narrative;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Countdown at the start of a run (seconds)
    pub const START_TIME_SECS: u32 = 20;
    /// Countdown never drops below this on later levels (seconds)
    pub const MIN_LEVEL_TIME_SECS: u32 = 10;

    /// Filling count bounds: min(level + 2, 6) ..= min(level * 2 + 3, 10)
    pub const MIN_FILL_CAP: u32 = 6;
    pub const MAX_FILL_CAP: u32 = 10;

    /// Bonus points per completed level number
    pub const BONUS_PER_LEVEL: u64 = 100;
    /// Bonus points per second left on the clock
    pub const BONUS_PER_SECOND: u64 = 10;

    /// Countdown tick period (milliseconds)
    pub const TICK_MS: u64 = 1000;
}

/// Countdown granted when advancing into `level` (20 - level, floor at 10s).
///
/// A fresh run starts at [`consts::START_TIME_SECS`] instead.
#[inline]
pub fn level_time(level: u32) -> u32 {
    consts::START_TIME_SECS
        .saturating_sub(level)
        .max(consts::MIN_LEVEL_TIME_SECS)
}
