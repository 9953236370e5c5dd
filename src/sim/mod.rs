//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded/injected RNG only
//! - No clocks (the host reports elapsed seconds)
//! - No rendering, network or platform dependencies

pub mod autopilot;
pub mod ingredient;
pub mod layout;
pub mod order;
pub mod score;
pub mod session;
pub mod stack;
pub mod state;

pub use autopilot::next_intent;
pub use ingredient::{FILLINGS, Ingredient, IngredientDef, Shape};
pub use layout::{LayerPlacement, stack_height, stack_layout};
pub use order::{filling_range, generate_order, matches_order};
pub use score::bonus;
pub use session::Session;
pub use stack::StackEditor;
pub use state::{GameEvent, Intent, Screen, Snapshot};
