//! Burger Stack entry point
//!
//! Headless demo: the autopilot plays one shift in real time, slowing down
//! each level until the countdown wins, then the result is logged.

use std::sync::Arc;

use burger_stack::Settings;
use burger_stack::narrative::{GeminiNarrator, Narrator};
use burger_stack::platform;
use burger_stack::sim::Session;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Burger Stack (headless autopilot) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Order seed: {}", seed);

    let narrator: Option<Arc<dyn Narrator>> = if settings.narrative.enabled {
        let gemini = GeminiNarrator::from_settings(&settings.narrative);
        if !gemini.has_api_key() {
            log::warn!("No Gemini API key set; narrative text will use fallbacks");
        }
        Some(Arc::new(gemini))
    } else {
        None
    };

    let (handle, join) = platform::spawn(Session::new(seed), narrator);

    match platform::run_autopilot(&handle, &settings.autopilot).await {
        Some(snap) => {
            log::info!("Termination notice: \"{}\"", snap.feedback);
            log::info!(
                "Final salary ${} after {} badge(s), level {}",
                snap.score,
                snap.badges,
                snap.level
            );
        }
        None => log::warn!("Game driver stopped before the shift ended"),
    }

    drop(handle);
    match join.await {
        Ok(session) => {
            let board = session.high_scores();
            if let Some(best) = board.top_score() {
                log::info!("Best salary this session: ${}", best);
            }
            for (rank, entry) in board.entries.iter().enumerate() {
                log::info!("Rank {}: ${} (level {})", rank + 1, entry.score, entry.level);
            }
        }
        Err(e) => log::error!("Game driver failed: {}", e),
    }
}
