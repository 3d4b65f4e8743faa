/// Score signals owned by the UI layer and fed by simulation events.

use tracing::info;

use crate::entities::GameEvent;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Scored(points) => self.score += points,
            GameEvent::GameOver => {
                self.game_over = true;
                self.high_score = self.high_score.max(self.score);
                info!(score = self.score, high_score = self.high_score, "game over");
            }
        }
    }

    /// Back to a fresh round; the high score survives.
    pub fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
    }

    /// Whether the round that just ended set a new best.
    pub fn is_new_best(&self) -> bool {
        self.game_over && self.score > 0 && self.score == self.high_score
    }
}
