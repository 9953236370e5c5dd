//! Flavor text for level results
//!
//! A level result asks an external text generator for a short message: a
//! promotion note after a cleared level, a termination notice after a failed
//! one. The generator may fail for any reason; every request kind carries a
//! fixed fallback so the game never waits on it.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gemini::GeminiNarrator;

/// Identifies the session state a request was issued for
pub type Ticket = u64;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    WrongOrder,
    TimeExpired,
}

impl FailureReason {
    /// Human-readable reason, also fed into the prompt
    pub fn describe(self) -> &'static str {
        match self {
            FailureReason::WrongOrder => "You served the wrong burger!",
            FailureReason::TimeExpired => "You ran out of time!",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// What the text should be about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeKind {
    /// Level cleared
    Promotion { level: u32, bonus: u64 },
    /// Run over
    Termination {
        level: u32,
        score: u64,
        reason: FailureReason,
    },
}

impl NarrativeKind {
    pub fn prompt(&self) -> String {
        match self {
            NarrativeKind::Promotion { level, bonus } => format!(
                "You are a supportive but demanding restaurant owner.\n\
                 Congratulate a chef for completing level {level}.\n\
                 Mention they earned a bonus of ${bonus}.\n\
                 Give them a weird, random tip for the next level involving burgers.\n\
                 Keep it under 40 words."
            ),
            NarrativeKind::Termination {
                level,
                score,
                reason,
            } => format!(
                "You are a ruthless, angry, shouting restaurant owner (like Gordon Ramsay).\n\
                 Write a short, funny, and mean \"Fired Notice\" for a chef who failed at level {level}.\n\
                 They earned a salary of ${score}.\n\
                 The reason they failed: {reason}.\n\
                 Keep it under 50 words. Start with \"YOU ARE FIRED!\"."
            ),
        }
    }

    /// Sampling temperature for the generator
    pub fn temperature(&self) -> f32 {
        match self {
            NarrativeKind::Promotion { .. } => 0.8,
            NarrativeKind::Termination { .. } => 0.9,
        }
    }

    /// Fixed text used when the generator fails
    pub fn fallback(&self) -> String {
        match self {
            NarrativeKind::Promotion { bonus, .. } => {
                format!("Great job! Here is your bonus of ${bonus}. Get ready for the next rush!")
            }
            NarrativeKind::Termination { .. } => {
                "YOU ARE FIRED! GET OUT OF MY KITCHEN! (AI Connection Lost)".to_string()
            }
        }
    }
}

/// A request issued by a session on entering LevelEnd or GameOver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub ticket: Ticket,
    pub kind: NarrativeKind,
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative text disabled")]
    Disabled,
    #[error("no API key configured")]
    MissingApiKey,
    #[error("narrative request failed: {0}")]
    RequestFailed(String),
    #[error("invalid narrative response: {0}")]
    InvalidResponse(String),
    #[error("narrative response was empty")]
    EmptyResponse,
}

/// External text generator
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn compose(&self, kind: &NarrativeKind) -> Result<String, NarrativeError>;
}

/// Single attempt; trimmed text, blank output counts as a failure
pub async fn request_text(
    narrator: &dyn Narrator,
    kind: &NarrativeKind,
) -> Result<String, NarrativeError> {
    let text = narrator.compose(kind).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Like [`request_text`] but never fails: errors become the kind's fallback
pub async fn narrate(narrator: &dyn Narrator, kind: &NarrativeKind) -> String {
    match request_text(narrator, kind).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Narrative unavailable, using fallback: {}", e);
            kind.fallback()
        }
    }
}
