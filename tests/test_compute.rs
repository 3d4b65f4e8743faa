use canvas_shooter::canvas::RecordingCanvas;
use canvas_shooter::compute::*;
use canvas_shooter::entities::*;
use canvas_shooter::scoreboard::Scoreboard;
use canvas_shooter::tuning::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(CANVAS_WIDTH, CANVAS_HEIGHT)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f32, y: f32, speed: f32) -> Enemy {
    Enemy {
        rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
        speed,
        color: ENEMY_COLOR,
    }
}

const IDLE: MoveInput = MoveInput { left: false, right: false };

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.rect, Rect::new(380.0, 540.0, 40.0, 40.0));
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert!(s.particles.is_empty());
    assert_eq!(s.frame, 0);
    assert!(!s.game_over);
}

// ── collide ───────────────────────────────────────────────────────────────────

#[test]
fn collide_is_symmetric() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    let c = Rect::new(50.0, 50.0, 10.0, 10.0);
    assert!(collide(&a, &b));
    assert!(collide(&b, &a));
    assert_eq!(collide(&a, &c), collide(&c, &a));
}

#[test]
fn collide_false_when_separated() {
    let a = Rect::new(100.0, 100.0, 10.0, 10.0);
    for other in [
        Rect::new(0.0, 100.0, 10.0, 10.0),
        Rect::new(200.0, 100.0, 10.0, 10.0),
        Rect::new(100.0, 0.0, 10.0, 10.0),
        Rect::new(100.0, 200.0, 10.0, 10.0),
    ] {
        assert!(!collide(&a, &other));
        assert!(!collide(&other, &a));
    }
}

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!collide(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!collide(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(!collide(&a, &Rect::new(-10.0, 0.0, 10.0, 10.0)));
    assert!(!collide(&a, &Rect::new(0.0, -10.0, 10.0, 10.0)));
    assert!(collide(&a, &Rect::new(9.5, 9.5, 10.0, 10.0)));
}

#[test]
fn contained_rect_collides() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 2.0, 2.0);
    assert!(collide(&outer, &inner));
    assert!(collide(&inner, &outer));
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_left_and_right_step_five() {
    let mut s = make_state();
    move_player(&mut s, &MoveInput { left: true, right: false });
    assert_eq!(s.player.rect.x, 375.0);
    move_player(&mut s, &MoveInput { left: false, right: true });
    move_player(&mut s, &MoveInput { left: false, right: true });
    assert_eq!(s.player.rect.x, 385.0);
}

#[test]
fn move_clamps_to_canvas() {
    let mut s = make_state();
    s.player.rect.x = 3.0;
    move_player(&mut s, &MoveInput { left: true, right: false });
    assert_eq!(s.player.rect.x, 0.0);

    s.player.rect.x = 758.0;
    move_player(&mut s, &MoveInput { left: false, right: true });
    assert_eq!(s.player.rect.x, 760.0);
}

#[test]
fn both_directions_cancel_out() {
    let mut s = make_state();
    move_player(&mut s, &MoveInput { left: true, right: true });
    assert_eq!(s.player.rect.x, 380.0);
}

#[test]
fn idle_input_does_not_move() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    for _ in 0..10 {
        tick(&mut s, &IDLE, &mut rng, &mut canvas);
    }
    assert_eq!(s.player.rect.x, 380.0);
}

// ── shoot ─────────────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_bullet_centered_on_player_top() {
    let mut s = make_state();
    assert!(shoot(&mut s));
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].rect, Rect::new(397.5, 540.0, 5.0, 10.0));
}

#[test]
fn shoot_ignored_when_game_over() {
    let mut s = make_state();
    s.game_over = true;
    assert!(!shoot(&mut s));
    assert!(s.bullets.is_empty());
}

#[test]
fn shoot_has_no_cooldown() {
    let mut s = make_state();
    for _ in 0..5 {
        shoot(&mut s);
    }
    assert_eq!(s.bullets.len(), 5);
}

// ── restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_ignored_while_playing() {
    let mut s = make_state();
    shoot(&mut s);
    assert!(!restart(&mut s));
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn restart_clears_everything() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.player.rect.x = 12.0;
    for _ in 0..4 {
        shoot(&mut s);
        spawn_enemy(&mut s, &mut rng);
    }
    s.particles = burst(10.0, 10.0, ENEMY_COLOR, &mut rng);
    s.frame = 1234;
    s.game_over = true;

    assert!(restart(&mut s));
    assert!(!s.game_over);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.is_empty());
    assert!(s.particles.is_empty());
    assert_eq!(s.player.rect.x, 380.0);
    assert_eq!(s.player.rect.y, 540.0);
    assert_eq!(s.frame, 0);
}

// ── spawn_enemy / burst ───────────────────────────────────────────────────────

#[test]
fn spawned_enemies_stay_in_range() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..500 {
        spawn_enemy(&mut s, &mut rng);
    }
    for e in &s.enemies {
        assert!(e.rect.x >= 0.0 && e.rect.x <= CANVAS_WIDTH - ENEMY_SIZE);
        assert_eq!(e.rect.y, -ENEMY_SIZE);
        assert!(e.speed >= ENEMY_MIN_SPEED && e.speed < ENEMY_MAX_SPEED);
        assert_eq!(e.color, ENEMY_COLOR);
    }
}

#[test]
fn burst_is_a_ring_of_fifteen() {
    let mut rng = seeded_rng();
    let particles = burst(115.0, 95.0, ENEMY_COLOR, &mut rng);
    assert_eq!(particles.len(), PARTICLE_COUNT);
    for p in &particles {
        assert_eq!((p.rect.x, p.rect.y), (115.0, 95.0));
        assert_eq!((p.rect.width, p.rect.height), (2.0, 2.0));
        assert!((p.dx * p.dx + p.dy * p.dy).sqrt() <= PARTICLE_MAX_SPEED + 1e-4);
        assert_eq!(p.life(), 1.0);
        assert_eq!(p.color, ENEMY_COLOR);
    }
    // The first particle points along +x, so it never moves vertically.
    assert!(particles[0].dy.abs() < 1e-6);
}

// ── tick: drawing ─────────────────────────────────────────────────────────────

#[test]
fn tick_draws_background_then_player_then_bullets() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    shoot(&mut s);
    tick(&mut s, &IDLE, &mut rng, &mut canvas);

    assert_eq!(canvas.ops[0], (Rect::new(0.0, 0.0, 800.0, 600.0), BACKGROUND));
    assert_eq!(canvas.ops[1], (s.player.rect, PLAYER_COLOR));
    assert_eq!(canvas.ops[2], (Rect::new(397.5, 533.0, 5.0, 10.0), BULLET_COLOR));
    assert_eq!(canvas.ops.len(), 3);
}

// ── tick: bullets ─────────────────────────────────────────────────────────────

#[test]
fn bullet_removed_exactly_when_above_canvas() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    shoot(&mut s);

    // 540 − 7k + 10 ≤ 0 first holds at k = 79.
    for k in 1..=78 {
        tick(&mut s, &IDLE, &mut rng, &mut canvas);
        s.enemies.clear();
        assert_eq!(s.bullets.len(), 1, "bullet gone early at frame {k}");
        assert_eq!(s.bullets[0].rect.y, 540.0 - 7.0 * k as f32);
    }
    tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert!(s.bullets.is_empty());

    for _ in 0..10 {
        tick(&mut s, &IDLE, &mut rng, &mut canvas);
        s.enemies.clear();
        assert!(s.bullets.is_empty());
    }
}

// ── tick: spawning ────────────────────────────────────────────────────────────

#[test]
fn spawn_cadence_is_one_per_sixty_frames() {
    for frames in [59u64, 60, 61, 250, 600] {
        let mut s = make_state();
        let mut rng = seeded_rng();
        let mut canvas = RecordingCanvas::new();
        let mut spawned = 0;
        for _ in 0..frames {
            tick(&mut s, &IDLE, &mut rng, &mut canvas);
            spawned += s.enemies.len() as u64;
            s.enemies.clear();
        }
        assert_eq!(spawned, frames / ENEMY_SPAWN_INTERVAL, "after {frames} frames");
    }
}

#[test]
fn spawned_enemy_moves_in_its_first_frame() {
    let mut s = make_state();
    s.frame = ENEMY_SPAWN_INTERVAL - 1;
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(s.enemies.len(), 1);
    let e = &s.enemies[0];
    assert_eq!(e.rect.y, -ENEMY_SIZE + e.speed);
}

// ── tick: enemies ─────────────────────────────────────────────────────────────

#[test]
fn enemy_leaving_the_bottom_is_dropped() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 598.0, 3.0));
    s.enemies.push(enemy_at(0.0, 590.0, 2.0));
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert!(events.is_empty());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].rect.y, 592.0);
}

#[test]
fn bullet_hit_scores_and_bursts() {
    let mut s = make_state();
    s.enemies.push(enemy_at(385.0, 400.0, 2.0));
    s.bullets.push(Bullet { rect: Rect::new(397.5, 430.0, 5.0, 10.0) });
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::Scored(ENEMY_POINTS)]);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.particles.len(), PARTICLE_COUNT);
    assert!(!s.game_over);
}

#[test]
fn one_bullet_destroys_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(385.0, 400.0, 2.0));
    s.enemies.push(enemy_at(385.0, 400.0, 2.0));
    s.bullets.push(Bullet { rect: Rect::new(397.5, 430.0, 5.0, 10.0) });
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::Scored(ENEMY_POINTS)]);
    assert_eq!(s.enemies.len(), 1);
    assert!(s.bullets.is_empty());
}

#[test]
fn enemy_touching_player_ends_game() {
    let mut s = make_state();
    s.enemies.push(enemy_at(390.0, 520.0, 2.0));
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::GameOver]);
    assert!(s.game_over);
    assert!(s.enemies.is_empty());
}

#[test]
fn bullet_check_wins_over_player_check() {
    let mut s = make_state();
    s.enemies.push(enemy_at(385.0, 515.0, 2.0));
    shoot(&mut s);
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::Scored(ENEMY_POINTS)]);
    assert!(!s.game_over);
    assert!(s.enemies.is_empty());
}

#[test]
fn game_over_is_reported_after_same_frame_kills() {
    let mut s = make_state();
    // First enemy lands on the player, the second one is shot down.
    s.enemies.push(enemy_at(390.0, 520.0, 2.0));
    s.enemies.push(enemy_at(385.0, 400.0, 2.0));
    s.bullets.push(Bullet { rect: Rect::new(397.5, 430.0, 5.0, 10.0) });
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    let mut board = Scoreboard { score: 500, high_score: 0, game_over: false };

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::Scored(ENEMY_POINTS), GameEvent::GameOver]);
    for event in &events {
        board.apply(event);
    }
    assert!(s.game_over);
    assert!(s.enemies.is_empty());
    assert_eq!(board.score, 600);
    assert_eq!(board.high_score, 600);
}

#[test]
fn two_enemies_on_the_player_end_the_game_once() {
    let mut s = make_state();
    s.enemies.push(enemy_at(385.0, 520.0, 2.0));
    s.enemies.push(enemy_at(395.0, 525.0, 2.0));
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
    assert_eq!(events, vec![GameEvent::GameOver]);
    assert!(s.enemies.is_empty());
}

#[test]
fn score_only_moves_on_bullet_hits() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    let mut board = Scoreboard::new();
    let mut last = 0;

    for frame in 0..2000 {
        if frame % 15 == 0 {
            shoot(&mut s);
        }
        let input = MoveInput { left: frame % 200 < 100, right: frame % 200 >= 100 };
        for event in tick(&mut s, &input, &mut rng, &mut canvas) {
            board.apply(&event);
            if let GameEvent::Scored(points) = event {
                assert_eq!(points, 100);
                assert_eq!(board.score, last + 100);
            }
            assert!(board.score >= last);
            last = board.score;
        }
        canvas.clear();
        if s.game_over {
            break;
        }
    }
    assert_eq!(board.score % 100, 0);
}

// ── tick: particles ───────────────────────────────────────────────────────────

#[test]
fn particle_fades_out_over_fifty_frames() {
    let marker = Rgba::rgb(1, 2, 3);
    let mut s = make_state();
    s.particles.push(Particle {
        rect: Rect::new(100.0, 100.0, PARTICLE_SIZE, PARTICLE_SIZE),
        dx: 1.0,
        dy: -0.5,
        remaining: PARTICLE_LIFETIME,
        color: marker,
    });
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();

    let mut previous = 1.0f32;
    for frame in 1..=PARTICLE_LIFETIME {
        canvas.clear();
        tick(&mut s, &IDLE, &mut rng, &mut canvas);
        s.enemies.clear();

        let drawn: Vec<_> = canvas.filled_with(marker).collect();
        assert_eq!(drawn.len(), 1);
        let alpha = drawn[0].1.a;
        assert!(alpha < previous);
        assert!((previous - alpha - 0.02).abs() < 1e-5);
        previous = alpha;

        if frame < PARTICLE_LIFETIME {
            assert_eq!(s.particles.len(), 1);
            assert_eq!(s.particles[0].life(), alpha);
            assert_eq!(s.particles[0].rect.x, 100.0 + frame as f32);
        }
    }
    assert_eq!(previous, 0.0);
    assert!(s.particles.is_empty());
}

// ── End-to-end ────────────────────────────────────────────────────────────────

#[test]
fn bullet_meets_falling_enemy() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let mut canvas = RecordingCanvas::new();
    let mut board = Scoreboard::new();

    // Line the player up under the enemy's column, then fire.
    s.player.rect.x = 85.0;
    s.enemies.push(enemy_at(100.0, -30.0, 2.0));
    shoot(&mut s);
    assert_eq!(s.bullets[0].rect.y, 540.0);

    let mut hit_frame = None;
    for frame in 1..=100 {
        let events = tick(&mut s, &IDLE, &mut rng, &mut canvas);
        canvas.clear();
        for event in &events {
            board.apply(event);
        }
        if !events.is_empty() {
            hit_frame = Some(frame);
            break;
        }
    }

    // Bullet top 540 − 7k drops below enemy bottom 2k once k > 60.
    assert_eq!(hit_frame, Some(61));
    assert_eq!(board.score, 100);
    assert_eq!(s.particles.len(), PARTICLE_COUNT);
    assert!(s.bullets.is_empty());
    assert!(s.enemies.iter().all(|e| e.rect.x != 100.0));
    assert!(!s.game_over);
}
