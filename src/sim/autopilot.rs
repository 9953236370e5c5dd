//! Idle/demo mode - picks the next intent from a snapshot
//!
//! Plays perfectly, one action per call. How fast it is called is up to the
//! host; the demo in `platform::demo` slows down every level.

use super::order::matches_order;
use super::state::{Intent, Screen, Snapshot};

pub fn next_intent(snap: &Snapshot) -> Option<Intent> {
    match snap.screen {
        Screen::Menu => Some(Intent::Start),
        Screen::LevelEnd if !snap.awaiting_narrative => Some(Intent::NextLevel),
        Screen::LevelEnd | Screen::GameOver => None,
        Screen::Playing => Some(playing_intent(snap)),
    }
}

fn playing_intent(snap: &Snapshot) -> Intent {
    if matches_order(&snap.stack, &snap.order) {
        return Intent::Submit;
    }

    let on_track = snap.stack.len() <= snap.order.len()
        && snap.stack.iter().zip(&snap.order).all(|(a, b)| a == b);
    if !on_track {
        return Intent::Undo;
    }

    let next = snap.order[snap.stack.len()];
    // Reuse an undone layer when it is the one we need
    if snap.redo.first() == Some(&next) {
        Intent::Redo
    } else {
        Intent::Append(next)
    }
}
