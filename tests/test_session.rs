use flappy_game::config::GameConfig;
use flappy_game::entities::Phase;
use flappy_game::error::ConfigError;
use flappy_game::session::GameSession;

fn make_session() -> GameSession {
    GameSession::with_seed(GameConfig::default(), 42).unwrap()
}

fn playing_session() -> GameSession {
    let mut s = make_session();
    s.on_action();
    s
}

/// Tick until the session leaves `Playing`; returns the number of ticks.
fn tick_until_over(s: &mut GameSession) -> u32 {
    let mut ticks = 0;
    while s.phase() == Phase::Playing {
        s.tick();
        ticks += 1;
        assert!(ticks < 10_000, "session never ended");
    }
    ticks
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle() {
    let s = make_session();
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.score(), 0);
    assert!(s.stream().is_empty());
    assert_eq!(s.bird().y, 175.0);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = GameConfig {
        play_height: 0.0,
        ..GameConfig::default()
    };
    let err = GameSession::with_seed(config, 1).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositive { field: "play_height", .. }));
}

// ── Idle ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_while_idle_is_noop() {
    let mut s = make_session();
    let before = s.snapshot();
    for _ in 0..20 {
        s.tick();
    }
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.frame(), 0);
}

#[test]
fn action_from_idle_starts_play() {
    let s = playing_session();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score(), 0);
    assert_eq!(s.stream().len(), 1);
    assert_eq!(s.stream().front().unwrap().x, 300.0);
    assert_eq!(s.bird().y, 175.0);
    assert_eq!(s.bird().velocity_y, 0.0);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn action_while_playing_flaps_without_phase_change() {
    let mut s = playing_session();
    s.tick();
    s.on_action();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.bird().velocity_y, -8.5);
    assert_eq!(s.stream().len(), 1); // no reset
}

#[test]
fn tick_applies_gravity_and_scrolls() {
    let mut s = playing_session();
    s.tick();
    assert_eq!(s.bird().velocity_y, 0.5);
    assert_eq!(s.bird().y, 175.5);
    assert_eq!(s.stream().front().unwrap().x, 297.0);
    assert_eq!(s.frame(), 1);
}

#[test]
fn bird_x_never_changes_while_playing() {
    let mut s = playing_session();
    let mut n = 0;
    while s.phase() == Phase::Playing {
        if n % 17 == 0 {
            s.on_action();
        }
        s.tick();
        assert_eq!(s.bird().x, 50.0);
        n += 1;
        if n > 5_000 {
            break;
        }
    }
}

#[test]
fn gap_height_constant_for_all_obstacles() {
    let mut s = playing_session();
    for n in 0..400 {
        if n % 16 == 0 {
            s.on_action();
        }
        s.tick();
        for o in s.stream().iter() {
            assert_eq!(o.gap_bottom - o.gap_top, 150.0);
            assert!(o.gap_top >= 100.0);
        }
        if s.phase() != Phase::Playing {
            s.on_action();
        }
    }
}

#[test]
fn falling_bird_ends_the_game() {
    let mut s = playing_session();
    let ticks = tick_until_over(&mut s);
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(ticks, 26);
    assert!(s.bird().y + s.bird().height > 400.0);
}

// ── GameOver ──────────────────────────────────────────────────────────────────

#[test]
fn ticks_after_game_over_change_nothing() {
    let mut s = playing_session();
    tick_until_over(&mut s);
    let frozen = s.snapshot();
    let frame = s.frame();
    for _ in 0..50 {
        s.tick();
    }
    assert_eq!(s.snapshot(), frozen);
    assert_eq!(s.frame(), frame);
}

#[test]
fn action_after_game_over_restarts_without_idle() {
    let mut s = playing_session();
    tick_until_over(&mut s);
    s.on_action();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.score(), 0);
    assert_eq!(s.frame(), 0);
    assert_eq!(s.bird().y, 175.0);
    assert_eq!(s.bird().velocity_y, 0.0);
    assert_eq!(s.stream().len(), 1);
    assert_eq!(s.stream().front().unwrap().x, 300.0);
}

// ── snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_reports_entities() {
    let mut s = playing_session();
    s.tick();
    let snap = s.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.bird.x, 50.0);
    assert_eq!(snap.bird.y, 175.5);
    assert_eq!(snap.obstacles.len(), 1);

    let o = s.stream().front().unwrap();
    let view = &snap.obstacles[0];
    assert_eq!(view.top.x, 297.0);
    assert_eq!(view.top.y, 0.0);
    assert_eq!(view.top.height, o.gap_top);
    assert_eq!(view.bottom.y, o.gap_bottom);
    assert!((view.bottom.bottom() - 400.0).abs() < 1e-3);
    assert_eq!(snap.play_width, 300.0);
    assert_eq!(snap.play_height, 400.0);
}

#[test]
fn snapshot_is_detached_from_session() {
    let mut s = playing_session();
    let snap = s.snapshot();
    s.tick();
    assert_eq!(snap.bird.y, 175.0);
    assert_eq!(snap.obstacles[0].top.x, 300.0);
}

#[test]
fn wing_frame_cycles_every_five_ticks() {
    let mut s = playing_session();
    let mut frames = Vec::new();
    for _ in 0..15 {
        frames.push(s.snapshot().wing_frame);
        s.tick();
    }
    assert_eq!(frames, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
}
