//! Order generation and checking
//!
//! Orders always read bottom to top: bottom bun, fillings, top bun.

use rand::Rng;

use super::ingredient::{FILLINGS, Ingredient};
use crate::consts::{MAX_FILL_CAP, MIN_FILL_CAP};

/// Inclusive range of filling counts for a level
pub fn filling_range(level: u32) -> (u32, u32) {
    let level = level.max(1);
    let min_fill = (level + 2).min(MIN_FILL_CAP);
    let max_fill = (level * 2 + 3).min(MAX_FILL_CAP);
    (min_fill, max_fill)
}

/// Generate a random target order for `level`
///
/// The filling count is uniform over [`filling_range`], and each filling is
/// drawn independently (with replacement).
pub fn generate_order<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<Ingredient> {
    let (min_fill, max_fill) = filling_range(level);
    let count = rng.random_range(min_fill..=max_fill) as usize;

    let mut order = Vec::with_capacity(count + 2);
    order.push(Ingredient::BunBottom);
    for _ in 0..count {
        order.push(FILLINGS[rng.random_range(0..FILLINGS.len())]);
    }
    order.push(Ingredient::BunTop);
    order
}

/// Exact ordered equality: same length, same layer at every index
pub fn matches_order(stack: &[Ingredient], order: &[Ingredient]) -> bool {
    stack.len() == order.len() && stack.iter().zip(order).all(|(a, b)| a == b)
}
