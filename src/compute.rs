/// Game-logic functions.
///
/// Every function takes the `GameState` by exclusive reference; `tick` is the
/// only one that draws.  Randomness comes through an injected `Rng` so tests
/// can run with a seeded generator.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::entities::{Bullet, Enemy, GameEvent, GameState, Particle, Player, Rect, Rgba};
use crate::tuning::{
    BACKGROUND, BULLET_COLOR, BULLET_HEIGHT, BULLET_SPEED, BULLET_WIDTH, ENEMY_COLOR,
    ENEMY_MAX_SPEED, ENEMY_MIN_SPEED, ENEMY_POINTS, ENEMY_SIZE, ENEMY_SPAWN_INTERVAL,
    PARTICLE_COUNT, PARTICLE_LIFETIME, PARTICLE_MAX_SPEED, PARTICLE_SIZE, PLAYER_BOTTOM_MARGIN,
    PLAYER_COLOR, PLAYER_SIZE, PLAYER_SPEED,
};

/// Direction keys currently held, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// AABB overlap.  Strict on all four sides, so rectangles that only share
/// an edge do not collide.
pub fn collide(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn centered_player_x(width: f32) -> f32 {
    width / 2.0 - PLAYER_SIZE / 2.0
}

/// Build the initial state for a canvas of the given size.
pub fn init_state(width: f32, height: f32) -> GameState {
    GameState {
        player: Player {
            rect: Rect::new(
                centered_player_x(width),
                height - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        frame: 0,
        game_over: false,
        width,
        height,
    }
}

/// Spawn one enemy above the canvas at a random column.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let x = rng.gen::<f32>() * (state.width - ENEMY_SIZE).max(0.0);
    let speed = rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
    debug!(x, speed, frame = state.frame, "enemy spawned");
    state.enemies.push(Enemy {
        rect: Rect::new(x, -ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE),
        speed,
        color: ENEMY_COLOR,
    });
}

/// A ring of particles thrown outward from `(x, y)`, one per evenly spaced
/// angle, each with a random speed.
pub fn burst(x: f32, y: f32, color: Rgba, rng: &mut impl Rng) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / PARTICLE_COUNT as f32;
            Particle {
                rect: Rect::new(x, y, PARTICLE_SIZE, PARTICLE_SIZE),
                dx: angle.cos() * rng.gen::<f32>() * PARTICLE_MAX_SPEED,
                dy: angle.sin() * rng.gen::<f32>() * PARTICLE_MAX_SPEED,
                remaining: PARTICLE_LIFETIME,
                color,
            }
        })
        .collect()
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply held direction keys, left first, clamped to the canvas.
pub fn move_player(state: &mut GameState, input: &MoveInput) {
    let max_x = state.width - state.player.rect.width;
    let rect = &mut state.player.rect;
    if input.left {
        rect.x = (rect.x - PLAYER_SPEED).max(0.0);
    }
    if input.right {
        rect.x = (rect.x + PLAYER_SPEED).min(max_x);
    }
}

/// Fire one bullet from the centre of the player's top edge.
/// Ignored once the game is over.
pub fn shoot(state: &mut GameState) -> bool {
    if state.game_over {
        return false;
    }
    let player = &state.player.rect;
    state.bullets.push(Bullet {
        rect: Rect::new(
            player.x + player.width / 2.0 - BULLET_WIDTH / 2.0,
            player.y,
            BULLET_WIDTH,
            BULLET_HEIGHT,
        ),
    });
    true
}

/// Start a new round.  Only valid while the game is over; returns whether
/// anything changed.
pub fn restart(state: &mut GameState) -> bool {
    if !state.game_over {
        return false;
    }
    info!(
        enemies = state.enemies.len(),
        bullets = state.bullets.len(),
        particles = state.particles.len(),
        "restarting round"
    );
    state.game_over = false;
    state.player.rect.x = centered_player_x(state.width);
    state.bullets.clear();
    state.enemies.clear();
    state.particles.clear();
    state.frame = 0;
    true
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame and draw it onto `canvas`.
///
/// Draw order is background, player, bullets, enemies, particles.  Bullets
/// that hit something are only marked during the enemy pass and are
/// compacted once it finishes.  `GameOver` comes last among the frame's
/// events, at most once.
pub fn tick(
    state: &mut GameState,
    input: &MoveInput,
    rng: &mut impl Rng,
    canvas: &mut impl Canvas,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // ── 1. Clear ─────────────────────────────────────────────────────────────
    canvas.fill_rect(state.bounds(), BACKGROUND);

    // ── 2-3. Player ──────────────────────────────────────────────────────────
    move_player(state, input);
    canvas.fill_rect(state.player.rect, PLAYER_COLOR);

    // ── 4. Bullets ───────────────────────────────────────────────────────────
    for bullet in &mut state.bullets {
        bullet.rect.y -= BULLET_SPEED;
        canvas.fill_rect(bullet.rect, BULLET_COLOR);
    }
    state.bullets.retain(|b| b.rect.bottom() > 0.0);

    // ── 5. Spawn ─────────────────────────────────────────────────────────────
    state.frame += 1;
    if state.frame % ENEMY_SPAWN_INTERVAL == 0 {
        spawn_enemy(state, rng);
    }

    // ── 6. Enemies and collisions ────────────────────────────────────────────
    let mut spent = vec![false; state.bullets.len()];
    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    let mut player_hit = false;

    for mut enemy in enemies {
        enemy.rect.y += enemy.speed;
        canvas.fill_rect(enemy.rect, enemy.color);

        let hit = state
            .bullets
            .iter()
            .enumerate()
            .position(|(i, b)| !spent[i] && collide(&b.rect, &enemy.rect));
        if let Some(i) = hit {
            spent[i] = true;
            let (cx, cy) = enemy.rect.center();
            state.particles.extend(burst(cx, cy, enemy.color, rng));
            events.push(GameEvent::Scored(ENEMY_POINTS));
            continue;
        }

        if collide(&state.player.rect, &enemy.rect) {
            info!(frame = state.frame, "player hit");
            player_hit = true;
            continue;
        }

        if enemy.rect.y < state.height {
            survivors.push(enemy);
        }
    }
    state.enemies = survivors;

    // Reported after every kill of the frame so the final score is settled.
    if player_hit {
        state.game_over = true;
        events.push(GameEvent::GameOver);
    }

    let bullets = std::mem::take(&mut state.bullets);
    state.bullets = bullets
        .into_iter()
        .zip(spent)
        .filter(|(_, used)| !used)
        .map(|(b, _)| b)
        .collect();

    // ── 7. Particles ─────────────────────────────────────────────────────────
    for particle in &mut state.particles {
        particle.rect.x += particle.dx;
        particle.rect.y += particle.dy;
        particle.remaining = particle.remaining.saturating_sub(1);
        canvas.fill_rect(particle.rect, particle.color.with_alpha(particle.life()));
    }
    state.particles.retain(|p| p.remaining > 0);

    events
}
