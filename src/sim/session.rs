//! Session state machine
//!
//! Menu -> Playing -> (LevelEnd -> Playing)* -> GameOver -> Menu.
//!
//! The session is synchronous and owns no clock. A host calls [`Session::tick`]
//! once per elapsed second while [`Session::clock_running`] is true, and hands
//! narrative results back through [`Session::resolve_narrative`]. Every screen
//! transition retires the outstanding narrative ticket, so a late result for a
//! screen the player already left is dropped.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ingredient::Ingredient;
use super::order::{generate_order, matches_order};
use super::score::bonus;
use super::stack::StackEditor;
use super::state::{GameEvent, Intent, Screen, Snapshot};
use crate::consts::START_TIME_SECS;
use crate::highscores::HighScores;
use crate::level_time;
use crate::narrative::{
    FailureReason, NarrativeError, NarrativeKind, NarrativeRequest, Ticket,
};

#[derive(Debug, Clone)]
pub struct Session<R = Pcg32> {
    rng: R,
    screen: Screen,
    level: u32,
    score: u64,
    badges: u32,
    time_left: u32,
    order: Vec<Ingredient>,
    editor: StackEditor,
    feedback: String,
    high_scores: HighScores,
    /// Outstanding narrative request, if any
    pending: Option<NarrativeRequest>,
    next_ticket: Ticket,
    last_failure: Option<FailureReason>,
    revision: u64,
    events: Vec<GameEvent>,
}

impl Session<Pcg32> {
    /// Session with a seeded PCG generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Session drawing orders from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            screen: Screen::Menu,
            level: 1,
            score: 0,
            badges: 0,
            time_left: START_TIME_SECS,
            order: Vec::new(),
            editor: StackEditor::new(),
            feedback: String::new(),
            high_scores: HighScores::new(),
            pending: None,
            next_ticket: 1,
            last_failure: None,
            revision: 0,
            events: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn badges(&self) -> u32 {
        self.badges
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn order(&self) -> &[Ingredient] {
        &self.order
    }

    pub fn editor(&self) -> &StackEditor {
        &self.editor
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn pending_narrative(&self) -> Option<&NarrativeRequest> {
        self.pending.as_ref()
    }

    pub fn awaiting_narrative(&self) -> bool {
        self.pending.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The countdown runs exactly while Playing
    pub fn clock_running(&self) -> bool {
        self.screen == Screen::Playing
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen,
            level: self.level,
            score: self.score,
            badges: self.badges,
            time_left: self.time_left,
            order: self.order.clone(),
            stack: self.editor.stack().to_vec(),
            redo: self.editor.redo_buffer().to_vec(),
            feedback: self.feedback.clone(),
            high_scores: self.high_scores.scores(),
            awaiting_narrative: self.awaiting_narrative(),
            last_failure: self.last_failure,
            revision: self.revision,
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Dispatch a player intent to its mutator
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Start => self.start(),
            Intent::Append(kind) => self.append_ingredient(kind),
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::Reset => self.reset_stack(),
            Intent::Submit => self.submit(),
            Intent::NextLevel => self.next_level(),
            Intent::ReturnToMenu => self.return_to_menu(),
        }
    }

    // === Player intents ===

    /// Menu -> Playing: fresh run at level 1
    pub fn start(&mut self) {
        if self.screen != Screen::Menu {
            return;
        }
        self.score = 0;
        self.badges = 0;
        self.last_failure = None;
        log::info!("Shift started");
        self.begin_level(1, START_TIME_SECS);
    }

    pub fn append_ingredient(&mut self, kind: Ingredient) {
        if self.screen != Screen::Playing {
            return;
        }
        self.editor.append(kind);
        log::debug!("Placed {} ({} layers)", kind, self.editor.len());
        self.touch();
    }

    pub fn undo(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(kind) = self.editor.undo() {
            log::debug!("Undo {}", kind);
            self.touch();
        }
    }

    pub fn redo(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(kind) = self.editor.redo() {
            log::debug!("Redo {}", kind);
            self.touch();
        }
    }

    pub fn reset_stack(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        self.editor.reset();
        self.touch();
    }

    /// Serve the stack: LevelEnd on an exact match, GameOver otherwise
    pub fn submit(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if !matches_order(self.editor.stack(), &self.order) {
            self.fail(FailureReason::WrongOrder);
            return;
        }

        let bonus = bonus(self.time_left, self.level);
        self.score += bonus;
        self.badges += 1;
        log::info!(
            "Level {} cleared with {}s left: +{} (total {})",
            self.level,
            self.time_left,
            bonus,
            self.score
        );

        self.enter(Screen::LevelEnd);
        self.events.push(GameEvent::LevelCleared {
            level: self.level,
            bonus,
        });
        self.issue_narrative(NarrativeKind::Promotion {
            level: self.level,
            bonus,
        });
    }

    /// LevelEnd -> Playing at the next level
    pub fn next_level(&mut self) {
        if self.screen != Screen::LevelEnd {
            return;
        }
        let level = self.level + 1;
        self.begin_level(level, level_time(level));
    }

    /// GameOver -> Menu. Run stats stay visible until the next start.
    pub fn return_to_menu(&mut self) {
        if self.screen != Screen::GameOver {
            return;
        }
        self.enter(Screen::Menu);
        self.events.push(GameEvent::ReturnedToMenu);
    }

    // === Autonomous inputs ===

    /// One countdown second elapsed. Ignored unless Playing.
    pub fn tick(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.fail(FailureReason::TimeExpired);
        } else {
            self.touch();
        }
    }

    /// Apply a narrative result. Errors fall back to fixed text.
    ///
    /// Returns false (and changes nothing) when `ticket` is not the
    /// outstanding request.
    pub fn resolve_narrative(
        &mut self,
        ticket: Ticket,
        result: Result<String, NarrativeError>,
    ) -> bool {
        let Some(request) = self.pending.take_if(|p| p.ticket == ticket) else {
            log::debug!("Discarding stale narrative result (ticket {})", ticket);
            return false;
        };

        self.feedback = match result {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Narrative request {} failed: {}", ticket, e);
                request.kind.fallback()
            }
        };
        self.touch();
        true
    }

    // === Internals ===

    fn begin_level(&mut self, level: u32, time_left: u32) {
        self.level = level;
        self.time_left = time_left;
        self.editor.reset();
        self.feedback.clear();
        self.order = generate_order(level, &mut self.rng);
        log::info!(
            "Level {}: {} layers, {}s on the clock",
            level,
            self.order.len(),
            time_left
        );
        self.enter(Screen::Playing);
        self.events.push(GameEvent::LevelStarted {
            level,
            order_len: self.order.len(),
            time_left,
        });
    }

    fn fail(&mut self, reason: FailureReason) {
        log::info!(
            "Run over at level {} with {}: {}",
            self.level,
            self.score,
            reason
        );
        self.last_failure = Some(reason);
        let rank = self.high_scores.record(self.score, self.level);
        self.enter(Screen::GameOver);
        self.events.push(GameEvent::GameOver {
            level: self.level,
            score: self.score,
            reason,
            rank,
        });
        self.issue_narrative(NarrativeKind::Termination {
            level: self.level,
            score: self.score,
            reason,
        });
    }

    /// Change screen; retires any outstanding narrative request
    fn enter(&mut self, screen: Screen) {
        if let Some(stale) = self.pending.take() {
            log::debug!("Retiring narrative ticket {}", stale.ticket);
        }
        self.screen = screen;
        self.touch();
    }

    fn issue_narrative(&mut self, kind: NarrativeKind) {
        let request = NarrativeRequest {
            ticket: self.next_ticket,
            kind,
        };
        self.next_ticket += 1;
        self.pending = Some(request.clone());
        self.events.push(GameEvent::NarrativeRequested(request));
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
