//! Headless autopilot demo
//!
//! The autopilot never misplaces a layer, so it acts more slowly on every
//! level. Eventually the countdown outruns it and the shift ends.

use crate::settings::AutopilotSettings;
use crate::sim::{Screen, Snapshot, next_intent};

use super::driver::GameHandle;

/// Play one shift until the termination notice is in.
///
/// Returns the final snapshot, or None if the driver stopped first.
pub async fn run_autopilot(handle: &GameHandle, settings: &AutopilotSettings) -> Option<Snapshot> {
    let mut reviewed_level = 0;
    loop {
        let snap = handle.snapshot();

        if snap.screen == Screen::LevelEnd
            && !snap.awaiting_narrative
            && snap.level != reviewed_level
        {
            log::info!("Level {} review: \"{}\"", snap.level, snap.feedback);
            reviewed_level = snap.level;
        }
        if snap.screen == Screen::GameOver && !snap.awaiting_narrative {
            return Some(snap);
        }

        if let Some(intent) = next_intent(&snap) {
            log::debug!("Autopilot: {:?}", intent);
            if !handle.send(intent) {
                return None;
            }
        }
        tokio::time::sleep(settings.pace(snap.level)).await;
    }
}
