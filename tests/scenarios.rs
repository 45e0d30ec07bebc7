//! End-to-end runs through `sim::step` and `Session`

use std::cell::Cell;
use std::f32::consts::FRAC_PI_4;
use std::rc::Rc;

use astro_dodge::platform::{FrameControl, FrameScheduler, ManualFrames};
use astro_dodge::sim::{GamePhase, GameState, Obstacle, step};
use astro_dodge::{InputCell, InputState, Session, TickInput, Tuning};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// No random spawns, so runs only contain what the test injects
fn quiet() -> Tuning {
    Tuning {
        spawn_chance: 0.0,
        burst_chance: 0.0,
        ..Default::default()
    }
}

#[test]
fn idle_craft_stays_put() {
    let tuning = quiet();
    let mut rng = Pcg32::seed_from_u64(1);
    let start = GameState::new_session(&tuning, 1_000.0);

    let next = step(&start, TickInput::default(), 1_016.0, &mut rng, &tuning);

    assert_eq!(next.craft.pos, Vec2::new(400.0, 300.0));
    assert_eq!(next.craft.rotation, 0.0);
    assert_eq!(next.phase, GamePhase::Running);
    assert!(next.obstacles.is_empty());
    assert_eq!(next.elapsed_ms, 16.0);

    let later = step(&next, TickInput::default(), 1_033.0, &mut rng, &tuning);
    assert!(later.elapsed_ms > next.elapsed_ms);
    assert_eq!(later.phase, GamePhase::Running);
}

#[test]
fn direct_hit_ends_session_and_freezes() {
    let tuning = quiet();
    let mut rng = Pcg32::seed_from_u64(2);
    let mut start = GameState::new_session(&tuning, 0.0);
    start
        .obstacles
        .push(Obstacle::new(start.craft.center(), 15.0, Vec2::ZERO));

    let hit = step(&start, TickInput::default(), 4_200.0, &mut rng, &tuning);
    assert_eq!(hit.phase, GamePhase::GameOver);
    assert_eq!(hit.elapsed_ms, 4_200.0);
    assert_eq!(hit.outcome().map(|o| o.elapsed_ms), Some(4_200.0));

    let held = TickInput {
        right: true,
        ..Default::default()
    };
    let after = step(&hit, held, 9_000.0, &mut rng, &tuning);
    assert_eq!(after, hit);
}

#[test]
fn up_left_turns_toward_diagonal() {
    let tuning = quiet();
    let mut rng = Pcg32::seed_from_u64(3);
    let start = GameState::new_session(&tuning, 0.0);
    let input = TickInput {
        up: true,
        left: true,
        ..Default::default()
    };

    let next = step(&start, input, 16.0, &mut rng, &tuning);

    assert!((next.craft.target_rotation - (-FRAC_PI_4)).abs() < 1e-6);
    let expected = 0.3 * (-FRAC_PI_4 - 0.0);
    assert!((next.craft.rotation - expected).abs() < 1e-6);
    assert_eq!(next.craft.pos, Vec2::new(395.0, 295.0));
}

#[test]
fn held_keys_drive_craft_into_corner() {
    let tuning = quiet();
    let mut session = Session::new(4, tuning);
    session.start(0.0);

    let input = InputCell::new();
    assert!(input.key_down("arrowright"));
    assert!(input.key_down("s"));
    assert!(!input.key_down("q"));

    for i in 1..=200 {
        session.advance(input.snapshot(), i as f64 * 16.0);
    }

    let craft = session.state().craft;
    assert_eq!(craft.pos, Vec2::new(770.0, 570.0));
    assert!((craft.rotation - 3.0 * FRAC_PI_4).abs() < 1e-3);
}

#[test]
fn scheduled_session_stops_on_game_over() {
    let tuning = quiet();
    let mut state = GameState::new_session(&tuning, 0.0);
    // Drifts onto the craft from the left
    state.obstacles.push(Obstacle::new(
        Vec2::new(300.0, 315.0),
        10.0,
        Vec2::new(5.0, 0.0),
    ));

    let mut session = Session::from_state(state, 5, tuning);
    let reported = Rc::new(Cell::new(0u32));
    {
        let reported = reported.clone();
        session.set_game_over_listener(move |_| reported.set(reported.get() + 1));
    }

    let mut scheduler = FrameScheduler::new(ManualFrames::new());
    scheduler.start();

    let mut now = 0.0;
    while scheduler.has_pending() {
        now += 16.0;
        scheduler.on_frame(|| match session.advance(InputState::new(), now) {
            GamePhase::Running => FrameControl::Continue,
            _ => FrameControl::Stop,
        });
        assert!(scheduler.frames() < 1_000, "loop never ended");
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(reported.get(), 1);
    assert!(!scheduler.is_running());
    // (415 - 23 - 300) / 5 rounds up to 19 ticks before overlap
    assert_eq!(session.state().ticks, 19);
}

#[test]
fn hidden_page_resumes_running_session() {
    let tuning = quiet();
    let mut session = Session::new(6, tuning);
    session.start(0.0);

    let mut scheduler = FrameScheduler::new(ManualFrames::new());
    scheduler.start();
    let mut now = 0.0;
    let mut pump = |scheduler: &mut FrameScheduler<ManualFrames>, session: &mut Session| {
        now += 16.0;
        scheduler.on_frame(|| match session.advance(InputState::new(), now) {
            GamePhase::Running => FrameControl::Continue,
            _ => FrameControl::Stop,
        })
    };

    for _ in 0..10 {
        pump(&mut scheduler, &mut session);
    }
    assert_eq!(session.state().ticks, 10);

    // Page hidden: loop cancelled, run still in progress
    scheduler.stop();
    assert_eq!(pump(&mut scheduler, &mut session), FrameControl::Stop);
    assert_eq!(session.state().ticks, 10);
    assert_eq!(session.phase(), GamePhase::Running);

    // Page shown again
    if session.phase() == GamePhase::Running && !scheduler.is_running() {
        scheduler.start();
    }
    assert!(scheduler.has_pending());
    for _ in 0..5 {
        pump(&mut scheduler, &mut session);
    }
    assert_eq!(session.state().ticks, 15);
    assert_eq!(session.phase(), GamePhase::Running);
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = |seed: u64| {
        let mut session = Session::new(seed, Tuning::default());
        session.start(0.0);
        let held = InputState::new().with_key(astro_dodge::Key::A, true);
        let mut frames = Vec::new();
        for i in 1..=300 {
            session.advance(held, i as f64 * 16.0);
            frames.push(session.state().obstacles.len());
        }
        (frames, session.state().clone())
    };

    assert_eq!(run(2024), run(2024));
}
