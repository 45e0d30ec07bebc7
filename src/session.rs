//! Session control
//!
//! A `Session` owns the current snapshot, the seeded RNG and the balance
//! table. Hosts call `start` to begin a run and `advance` once per frame;
//! the game-over listener fires exactly once per run.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::InputState;
use crate::sim::{GamePhase, GameState, SessionOutcome, step};
use crate::tuning::Tuning;

/// Callback invoked when the craft is first hit
pub type GameOverListener = Box<dyn FnMut(SessionOutcome)>;

pub struct Session {
    state: GameState,
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    on_game_over: Option<GameOverListener>,
}

impl Session {
    /// Create an idle session; nothing moves until `start`.
    ///
    /// A tuning table that fails validation is replaced by the defaults.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated_or_default();
        Self {
            state: GameState::idle(&tuning),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            on_game_over: None,
        }
    }

    /// Resume from an existing snapshot (the RNG restarts from `seed`)
    pub fn from_state(state: GameState, seed: u64, tuning: Tuning) -> Self {
        Self {
            state,
            ..Self::new(seed, tuning)
        }
    }

    pub fn set_game_over_listener(&mut self, listener: impl FnMut(SessionOutcome) + 'static) {
        self.on_game_over = Some(Box::new(listener));
    }

    /// Reset the craft, clear asteroids and restart the timer
    pub fn start(&mut self, now_ms: f64) {
        self.state = GameState::new_session(&self.tuning, now_ms);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Start over with a fresh RNG stream
    pub fn restart_with_seed(&mut self, seed: u64, now_ms: f64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.start(now_ms);
    }

    /// Run one tick with the input snapshot taken for this frame.
    ///
    /// Returns the phase after the tick; anything but `Running` means the
    /// caller can stop scheduling frames. Safe to call after game over.
    pub fn advance(&mut self, input: InputState, now_ms: f64) -> GamePhase {
        if !self.state.is_running() {
            return self.state.phase;
        }

        let next = step(
            &self.state,
            input.directions(),
            now_ms,
            &mut self.rng,
            &self.tuning,
        );
        self.state = next;

        if let Some(outcome) = self.state.outcome() {
            log::info!("Game over: survived {:.1}s", outcome.seconds());
            if let Some(listener) = self.on_game_over.as_mut() {
                listener(outcome);
            }
        }

        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::sim::Obstacle;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            burst_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = Session::new(1, Tuning::default());
        assert_eq!(session.advance(InputState::new(), 100.0), GamePhase::Idle);
        assert_eq!(session.state().ticks, 0);

        session.start(100.0);
        assert_eq!(session.advance(InputState::new(), 116.0), GamePhase::Running);
        assert_eq!(session.state().elapsed_ms, 16.0);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut state = GameState::new_session(&quiet(), 0.0);
        state
            .obstacles
            .push(Obstacle::new(state.craft.center(), 15.0, Vec2::ZERO));

        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let mut session = Session::from_state(state, 9, quiet());
        {
            let outcomes = outcomes.clone();
            session.set_game_over_listener(move |o| outcomes.borrow_mut().push(o));
        }

        assert_eq!(session.advance(InputState::new(), 2500.0), GamePhase::GameOver);
        assert_eq!(session.advance(InputState::new(), 3000.0), GamePhase::GameOver);
        assert_eq!(session.advance(InputState::new(), 3500.0), GamePhase::GameOver);

        let outcomes = outcomes.borrow();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].elapsed_ms, 2500.0);
        assert_eq!(session.state().elapsed_ms, 2500.0);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut session = Session::new(3, Tuning::default());
        session.start(0.0);
        let held = InputState::new().with_key(Key::D, true);
        for i in 1..=30 {
            session.advance(held, i as f64 * 16.0);
        }
        assert!(session.state().craft.pos.x > 400.0 || session.phase() == GamePhase::GameOver);

        session.start(10_000.0);
        let state = session.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.craft.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.craft.rotation, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.started_at_ms, 10_000.0);
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let run = |seed| {
            let mut session = Session::new(seed, Tuning::default());
            session.start(0.0);
            let held = InputState::new().with_key(Key::ArrowUp, true);
            for i in 1..=120 {
                session.advance(held, i as f64 * 16.0);
            }
            session.state().clone()
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let broken = Tuning {
            spawn_chance: 1.5,
            burst_chance: -2.0,
            ..Default::default()
        };

        let mut session = Session::new(8, broken.clone());
        session.start(0.0);
        for i in 1..=50 {
            session.advance(InputState::new(), i as f64 * 16.0);
        }
        assert!(session.state().ticks > 0);

        let resumed = Session::from_state(GameState::new_session(&quiet(), 0.0), 8, broken);
        assert_eq!(resumed.tuning, Tuning::default());
    }
}
