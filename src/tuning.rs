/// Gameplay tuning.  All per-frame quantities are fixed per call and never
/// scaled by elapsed wall time.

use crate::entities::Rgba;

// ── Canvas ───────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 40.0;
/// Gap between the player's bottom edge and the canvas bottom.
pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 5.0;

// ── Bullets ──────────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = BULLET_WIDTH * 2.0;
pub const BULLET_SPEED: f32 = 7.0;
/// Minimum frames between two shots.  Holding the fire key auto-fires at
/// this rate no matter how the terminal reports key repeat.
pub const SHOOT_COOLDOWN: u64 = 6;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 30.0;
pub const ENEMY_SPAWN_INTERVAL: u64 = 60;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
/// Exclusive upper bound of the randomised speed range.
pub const ENEMY_MAX_SPEED: f32 = 4.0;
pub const ENEMY_POINTS: u32 = 100;

// ── Particles ────────────────────────────────────────────────────────────────

pub const PARTICLE_COUNT: usize = 15;
pub const PARTICLE_SIZE: f32 = 2.0;
pub const PARTICLE_MAX_SPEED: f32 = 5.0;
/// Life drops by 1/PARTICLE_LIFETIME (0.02) every frame.
pub const PARTICLE_LIFETIME: u32 = 50;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BACKGROUND: Rgba = Rgba::rgb(0x0f, 0x17, 0x2a);
pub const PLAYER_COLOR: Rgba = Rgba::rgb(0x60, 0xa5, 0xfa);
pub const BULLET_COLOR: Rgba = Rgba::rgb(0xfb, 0xbf, 0x24);
pub const ENEMY_COLOR: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
