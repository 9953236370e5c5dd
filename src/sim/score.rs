//! Level completion bonus

use crate::consts::{BONUS_PER_LEVEL, BONUS_PER_SECOND};

/// `level * 100 + time_left * 10`
pub fn bonus(time_left: u32, level: u32) -> u64 {
    level as u64 * BONUS_PER_LEVEL + time_left as u64 * BONUS_PER_SECOND
}
