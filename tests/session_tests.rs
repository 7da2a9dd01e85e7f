use std::time::{Duration, Instant};

use tui_snake::core::{GameState, Snake};
use tui_snake::session::{IntervalScheduler, Session, TickScheduler, TimerToken};
use tui_snake::types::*;

const MS: Duration = Duration::from_millis(1);

/// Scheduler driven entirely by the test: it never fires on its own.
#[derive(Debug, Default)]
struct ManualScheduler {
    generation: u64,
    armed: Option<(TimerToken, Duration, Instant)>,
    periods: Vec<Duration>,
    cancels: u32,
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, period: Duration, now: Instant) -> TimerToken {
        self.generation += 1;
        let token = TimerToken::new(self.generation);
        self.armed = Some((token, period, now + period));
        self.periods.push(period);
        token
    }

    fn cancel(&mut self) {
        self.armed = None;
        self.cancels += 1;
    }

    fn poll(&mut self, _now: Instant) -> Option<TimerToken> {
        None
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, _, due)| due)
    }
}

impl ManualScheduler {
    fn token(&self) -> Option<TimerToken> {
        self.armed.map(|(token, _, _)| token)
    }
}

fn manual_session(state: GameState) -> Session<ManualScheduler> {
    Session::with_scheduler(state, ManualScheduler::default())
}

#[test]
fn start_arms_at_initial_speed() {
    let mut session = manual_session(GameState::new(1));
    session.start(Instant::now()).unwrap();
    assert_eq!(session.status(), GameStatus::Running);
    assert_eq!(session.scheduler().periods, vec![150 * MS]);
}

#[test]
fn pause_cancels_the_timer() {
    let t0 = Instant::now();
    let mut session = Session::new(1);
    session.start(t0).unwrap();
    session.pause().unwrap();

    assert!(!session.scheduler().is_armed());
    let before = session.state().clone();
    assert_eq!(session.advance(t0 + 10 * 150 * MS), Ok(None));
    assert_eq!(session.state(), &before);
}

#[test]
fn stale_token_after_reset_is_ignored() {
    let t0 = Instant::now();
    let mut session = manual_session(GameState::new(1));
    session.start(t0).unwrap();
    let stale = session.scheduler().token().unwrap();

    session.reset();
    assert_eq!(session.scheduler().cancels, 1);
    session.start(t0).unwrap();
    let live = session.scheduler().token().unwrap();
    assert_ne!(stale, live);

    assert_eq!(session.on_timer(stale, t0 + 150 * MS), Ok(None));
    assert_eq!(session.state().steps(), 0);

    session.on_timer(live, t0 + 150 * MS).unwrap();
    assert_eq!(session.state().steps(), 1);
    assert_eq!(session.state().snake().head(), Position::new(10, 9));
}

#[test]
fn eating_reschedules_at_the_new_speed() {
    let t0 = Instant::now();
    let state = GameState::from_layout(
        Snake::new(Position::new(10, 10)),
        Direction::Up,
        Position::new(10, 9),
        5,
    );
    let mut session = manual_session(state);
    session.start(t0).unwrap();
    let token = session.scheduler().token().unwrap();

    session.on_timer(token, t0 + 150 * MS).unwrap();

    assert_eq!(session.state().score(), 10);
    assert_eq!(session.scheduler().periods, vec![150 * MS, 148 * MS]);
    assert_eq!(session.scheduler().next_deadline(), Some(t0 + 298 * MS));
}

#[test]
fn game_over_reports_once_and_tracks_high_score() {
    let t0 = Instant::now();
    let state = GameState::from_layout(
        Snake::new(Position::new(10, 1)),
        Direction::Up,
        Position::new(10, 0),
        5,
    );
    let mut session = Session::with_scheduler(state, IntervalScheduler::new());
    session.start(t0).unwrap();

    // Eat at (10, 0), then run into the top wall.
    assert_eq!(session.advance(t0 + 150 * MS), Ok(None));
    let result = session.advance(t0 + 300 * MS).unwrap().expect("final score");
    assert_eq!(result.score, 10);
    assert_eq!(result.foods_eaten, 1);
    assert_eq!(result.cause, Some(TickEvent::Collided(CollisionKind::Wall)));
    assert_eq!(session.high_score(), 10);

    // Timer is gone: no second report.
    assert!(!session.scheduler().is_armed());
    assert_eq!(session.advance(t0 + 1_000 * MS), Ok(None));

    // A new session keeps the high score.
    session.apply_action(GameAction::Start, t0 + 1_000 * MS).unwrap();
    assert_eq!(session.status(), GameStatus::Running);
    assert_eq!(session.state().score(), 0);
    assert_eq!(session.high_score(), 10);
}

#[test]
fn input_is_read_once_per_tick_and_last_write_wins() {
    let t0 = Instant::now();
    let mut session = Session::new(9);
    session.start(t0).unwrap();

    assert!(session.request_direction(Direction::Left));
    assert!(session.request_direction(Direction::Right));
    session.advance(t0 + 150 * MS).unwrap();
    assert_eq!(session.state().direction(), Direction::Right);
    assert_eq!(session.state().snake().head(), Position::new(11, 10));

    // Nothing buffered: keeps heading right.
    session.advance(t0 + 300 * MS).unwrap();
    assert_eq!(session.state().snake().head(), Position::new(12, 10));
}

#[test]
fn requests_while_paused_are_discarded() {
    let t0 = Instant::now();
    let mut session = Session::new(9);
    session.start(t0).unwrap();
    session.pause().unwrap();

    assert!(!session.request_direction(Direction::Left));
    session.resume(t0).unwrap();
    session.advance(t0 + 150 * MS).unwrap();
    assert_eq!(session.state().direction(), Direction::Up);
}

#[test]
fn toggle_pause_round_trip() {
    let t0 = Instant::now();
    let mut session = Session::new(1);
    session.apply_action(GameAction::TogglePause, t0).unwrap();
    assert_eq!(session.status(), GameStatus::Running);
    session.apply_action(GameAction::TogglePause, t0).unwrap();
    assert_eq!(session.status(), GameStatus::Paused);
    session.apply_action(GameAction::TogglePause, t0).unwrap();
    assert_eq!(session.status(), GameStatus::Running);
}
