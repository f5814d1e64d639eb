//! Life loss resolution

use serde::{Deserialize, Serialize};

/// Lives left after a death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeResult {
    pub lives: u32,
    /// Always `lives == 0`
    pub game_over: bool,
}

/// Lose one life, flooring at zero
pub fn apply_player_death(current_lives: u32) -> LifeResult {
    let lives = current_lives.saturating_sub(1);
    LifeResult {
        lives,
        game_over: lives == 0,
    }
}
