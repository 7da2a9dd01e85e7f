//! Session controller - owns the single live [`GameState`].
//!
//! The session wires the pure engine to a [`TickScheduler`] and an
//! [`InputController`]:
//!
//! - `start` / `resume` arm the timer at the current speed
//! - `pause` cancels the timer and discards pending input
//! - `reset` cancels the timer before reinitialising the state
//! - a tick that changes the speed cancels and re-arms the timer
//! - a timer token from a cancelled generation is ignored
//!
//! Everything runs on one thread; the state is replaced wholesale on each
//! tick, so a renderer reading between ticks always sees a committed state.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::{engine, EngineError, GameState};
use crate::input::InputController;
use crate::scheduler::{IntervalScheduler, TickScheduler, TimerToken};
use crate::types::{Direction, GameAction, GameStatus, TickEvent};

/// Result of a finished session, handed to the score reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u32,
    pub episode_id: u32,
    pub foods_eaten: u32,
    pub steps: u32,
    /// What ended the session.
    pub cause: Option<TickEvent>,
}

impl FinalScore {
    fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score(),
            episode_id: state.episode_id(),
            foods_eaten: state.foods_eaten(),
            steps: state.steps(),
            cause: state.last_event(),
        }
    }
}

pub struct Session<S: TickScheduler = IntervalScheduler> {
    state: GameState,
    input: InputController,
    scheduler: S,
    /// Token of the timer generation allowed to drive ticks.
    live: Option<TimerToken>,
    /// Best score across all sessions since startup.
    high_score: u32,
}

impl Session<IntervalScheduler> {
    pub fn new(seed: u32) -> Self {
        Self::with_scheduler(GameState::new(seed), IntervalScheduler::new())
    }
}

impl<S: TickScheduler> Session<S> {
    pub fn with_scheduler(state: GameState, scheduler: S) -> Self {
        Self {
            state,
            input: InputController::new(),
            scheduler,
            live: None,
            high_score: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Final result while the session is `Over`.
    pub fn final_score(&self) -> Option<FinalScore> {
        self.state
            .is_over()
            .then(|| FinalScore::from_state(&self.state))
    }

    /// Ready -> Running
    pub fn start(&mut self, now: Instant) -> Result<(), EngineError> {
        self.state.start()?;
        self.arm(now);
        debug!(episode = self.state.episode_id(), "session started");
        Ok(())
    }

    /// Reset and start in one step (the "play again" path out of `Over`).
    pub fn restart(&mut self, now: Instant) -> Result<(), EngineError> {
        self.reset();
        self.start(now)
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.state.pause()?;
        self.disarm();
        // Requests made before or during a pause never reach a tick.
        self.input.clear();
        debug!(episode = self.state.episode_id(), "session paused");
        Ok(())
    }

    /// Paused -> Running
    pub fn resume(&mut self, now: Instant) -> Result<(), EngineError> {
        self.state.resume()?;
        self.arm(now);
        debug!(episode = self.state.episode_id(), "session resumed");
        Ok(())
    }

    /// Start from `Ready`, pause while running, resume while paused.
    pub fn toggle_pause(&mut self, now: Instant) -> Result<(), EngineError> {
        match self.state.status() {
            GameStatus::Ready => self.start(now),
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(now),
            GameStatus::Over => Err(EngineError::InvalidTransition {
                action: "pause",
                from: GameStatus::Over,
            }),
        }
    }

    /// Any status -> Ready. The timer is cancelled first so a tick already
    /// scheduled for the old session can never run against the new one.
    pub fn reset(&mut self) {
        self.disarm();
        self.input.clear();
        self.state.reset();
        debug!(episode = self.state.episode_id(), "session reset");
    }

    /// Buffer a direction request for the next tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.input.request(direction, self.state.status())
    }

    /// Apply a player intent.
    pub fn apply_action(&mut self, action: GameAction, now: Instant) -> Result<(), EngineError> {
        match action {
            GameAction::Turn(direction) => {
                self.request_direction(direction);
                Ok(())
            }
            GameAction::Start => match self.state.status() {
                GameStatus::Over => self.restart(now),
                _ => self.start(now),
            },
            GameAction::TogglePause => self.toggle_pause(now),
            GameAction::Reset => {
                self.reset();
                Ok(())
            }
        }
    }

    /// Poll the scheduler and run a tick if one is due.
    ///
    /// Returns the final score on the tick that ends the session.
    pub fn advance(&mut self, now: Instant) -> Result<Option<FinalScore>, EngineError> {
        match self.scheduler.poll(now) {
            Some(token) => self.on_timer(token, now),
            None => Ok(None),
        }
    }

    /// Run one tick for a timer firing.
    ///
    /// Tokens from a cancelled generation are ignored.
    pub fn on_timer(
        &mut self,
        token: TimerToken,
        now: Instant,
    ) -> Result<Option<FinalScore>, EngineError> {
        if self.live != Some(token) {
            debug!(generation = token.generation(), "ignoring stale tick");
            return Ok(None);
        }

        let requested = self.input.take();
        let next = engine::tick(&self.state, requested)?;
        let speed_changed = next.speed_ms() != self.state.speed_ms();
        self.state = next;

        if self.state.is_over() {
            self.disarm();
            self.high_score = self.high_score.max(self.state.score());
            let result = FinalScore::from_state(&self.state);
            info!(
                score = result.score,
                foods = result.foods_eaten,
                steps = result.steps,
                cause = ?result.cause,
                "game over"
            );
            return Ok(Some(result));
        }

        if speed_changed {
            debug!(speed_ms = self.state.speed_ms(), "rescheduling tick timer");
            self.arm(now);
        }
        Ok(None)
    }

    fn arm(&mut self, now: Instant) {
        let period = Duration::from_millis(u64::from(self.state.speed_ms()));
        self.live = Some(self.scheduler.arm(period, now));
    }

    fn disarm(&mut self) {
        self.scheduler.cancel();
        self.live = None;
    }
}
