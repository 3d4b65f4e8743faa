/// All game entity types: pure data, no logic.

use crate::tuning::{CANVAS_HEIGHT, CANVAS_WIDTH, PARTICLE_LIFETIME};

// ── Geometry & colour ─────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// An sRGB colour with a straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Downward distance travelled per frame.
    pub speed: f32,
    pub color: Rgba,
}

/// A spark thrown out when an enemy is shot down.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    /// Frames left before the particle disappears.
    pub remaining: u32,
    pub color: Rgba,
}

impl Particle {
    /// Life in `0.0..=1.0`; also the alpha the particle is drawn with.
    pub fn life(&self) -> f32 {
        self.remaining as f32 / PARTICLE_LIFETIME as f32
    }
}

// ── Events reported to the UI layer ───────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A bullet destroyed an enemy.
    Scored(u32),
    /// An enemy reached the player.
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the frame pass owns.  Score lives with the UI (see
/// `scoreboard`); the simulation only reports events.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub frame: u64,
    pub game_over: bool,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for GameState {
    fn default() -> Self {
        crate::compute::init_state(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
