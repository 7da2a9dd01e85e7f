//! Terminal Snake runner (default binary).
//!
//! Single-threaded loop: render, poll keyboard until the next tick deadline,
//! advance the session, collect leaderboard outcomes. Finished games are
//! reported in the background when a player identity is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_snake::core::GameSnapshot;
use tui_snake::input::{handle_key_event, handle_mouse_event, should_quit, SwipeTracker};
use tui_snake::leaderboard::{LeaderboardClient, PlayerIdentity, ScoreReporter};
use tui_snake::session::{Session, TickScheduler};
use tui_snake::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};
use tui_snake::types::{GameAction, GameStatus};

/// Upper bound on one keyboard poll so report outcomes surface while idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "tui-snake", version, about = "Terminal Snake with a remote leaderboard")]
struct Cli {
    /// Player name submitted with finished games
    #[arg(long, env = "SNAKE_PLAYER_NAME")]
    name: Option<String>,

    /// Player email (one submission per email every 5 minutes)
    #[arg(long, env = "SNAKE_PLAYER_EMAIL")]
    email: Option<String>,

    /// Leaderboard service root
    #[arg(long, env = "SNAKE_API_URL", default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Food placement seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Never submit scores
    #[arg(long, env = "SNAKE_REPORT_DISABLED")]
    no_report: bool,

    /// Print the top 5 and leaderboard stats, then exit
    #[arg(long)]
    top: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    if cli.top {
        return print_leaderboard(&LeaderboardClient::new(&cli.api_url));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// File logging only: the terminal belongs to the game view.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("SNAKE_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn build_reporter(cli: &Cli) -> Option<ScoreReporter> {
    if cli.no_report {
        return None;
    }
    let identity = PlayerIdentity {
        name: cli.name.clone()?,
        email: cli.email.clone()?,
    };
    Some(ScoreReporter::new(LeaderboardClient::new(&cli.api_url), identity))
}

fn run(term: &mut TerminalRenderer, cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(seed, "starting session");

    let mut session = Session::new(seed);
    let mut reporter = build_reporter(cli);
    let mut report_line: Option<String> = match (&reporter, cli.no_report) {
        (None, false) => Some("Set --name and --email to submit scores".to_string()),
        _ => None,
    };

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut swipe = SwipeTracker::new();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.state().snapshot_into(&mut snap);
        let hud = HudView {
            high_score: session.high_score(),
            player: cli.name.as_deref(),
            report: report_line.as_deref(),
        };
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input until the next tick is due.
        let now = Instant::now();
        let timeout = session
            .scheduler()
            .next_deadline()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(now).min(IDLE_POLL));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Err(e) = session.apply_action(action, Instant::now()) {
                            debug!(error = %e, ?action, "action ignored");
                        }
                        let fresh = matches!(action, GameAction::Start | GameAction::Reset)
                            && session.status() != GameStatus::Over;
                        if fresh && reporter.as_ref().is_some_and(|r| r.in_flight() == 0) {
                            report_line = None;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = handle_mouse_event(&mut swipe, mouse) {
                        if let Err(e) = session.apply_action(action, Instant::now()) {
                            debug!(error = %e, ?action, "swipe ignored");
                        }
                    }
                }
                Event::Resize(..) => {
                    swipe.cancel();
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if let Some(result) = session.advance(Instant::now())? {
            if let Some(reporter) = reporter.as_mut() {
                reporter.report(result.score);
                report_line = Some(format!("Submitting score {}...", result.score));
            }
        }

        if let Some(outcome) = reporter.as_mut().and_then(ScoreReporter::try_recv) {
            report_line = Some(outcome.summary());
        }
    }
}

fn print_leaderboard(client: &LeaderboardClient) -> Result<()> {
    let top = client.top5().context("failed to fetch top scores")?;
    let stats = client.stats().context("failed to fetch stats")?;

    println!("TOP 5");
    if top.is_empty() {
        println!("  (no scores yet)");
    }
    for entry in &top {
        println!("  {}. {:<20} {:>7}", entry.position, entry.player_name, entry.score);
    }
    println!();
    println!("Games played:   {}", stats.total_games);
    println!("Players:        {}", stats.total_players);
    println!("Highest score:  {}", stats.highest_score);
    println!("Average score:  {:.2}", stats.average_score);
    Ok(())
}
