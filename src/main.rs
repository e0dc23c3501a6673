mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_invaders::config;
use space_invaders::http::HttpScoreClient;
use space_invaders::input::{Action, InputSnapshot};
use space_invaders::ports::{Clock, RandomSource, RngSource, SystemClock};
use space_invaders::remote::{OfflineScores, ScoreService};
use space_invaders::{FrameDriver, RenderSurface};

use crate::display::TerminalSurface;

/// Frames a key stays active after its last press or repeat event. Terminals
/// without release events rely on OS key repeat to keep it refreshed.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Level-triggered actions for every key still inside its hold window.
fn add_held_actions(input: &mut InputSnapshot, key_frame: &HashMap<KeyCode, u64>, frame: u64) {
    if any_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame) {
        input.insert(Action::MoveLeft);
    }
    if any_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame) {
        input.insert(Action::MoveRight);
    }
    if is_held(key_frame, &KeyCode::Char(' '), frame) {
        input.insert(Action::Fire);
    }
}

/// Run one driver frame. A key that caused a scene change must be pressed
/// again to act in the new scene, so held keys are dropped on every change.
fn step<C: Clock, R: RandomSource>(
    driver: &mut FrameDriver<C, R>,
    key_frame: &mut HashMap<KeyCode, u64>,
    input: &InputSnapshot,
    surface: &mut dyn RenderSurface,
) -> io::Result<()> {
    let before = driver.scene().name();
    driver.frame(input, surface)?;
    if driver.scene().name() != before {
        key_frame.clear();
    }
    Ok(())
}

// ── Logging ───────────────────────────────────────────────────────────────────

// The terminal belongs to the renderer, so logs go to a file.
fn init_tracing() -> anyhow::Result<()> {
    let path = config::log_file();
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let writer = Mutex::new(file);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

fn score_service() -> Arc<dyn ScoreService> {
    let base_url = config::api_base_url();
    if base_url.trim().is_empty() {
        tracing::warn!("no score backend configured; scores will not be saved");
        return Arc::new(OfflineScores);
    }
    tracing::info!(%base_url, "using score backend");
    Arc::new(HttpScoreClient::new(base_url, config::http_timeout()))
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Movement and fire are level-triggered
/// (active while the key is fresh); Enter and Escape are edge-triggered and
/// only count on the frame their press arrives.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let mut driver = FrameDriver::new(
        SystemClock::new(),
        RngSource(thread_rng()),
        score_service(),
        config::player_name(),
        config::leaderboard_limit(),
    );
    let mut surface = TerminalSurface::new(out);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = InputSnapshot::new();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Enter => input.insert(Action::Confirm),
                        KeyCode::Esc => input.insert(Action::Back),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        add_held_actions(&mut input, &key_frame, frame);
        step(&mut driver, &mut key_frame, &input, &mut surface)?;

        let elapsed = frame_start.elapsed();
        if elapsed < config::FRAME {
            thread::sleep(config::FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events make held keys exact where supported.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads stay off the frame loop.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    tracing::info!("starting");
    let result = run(&mut out, &rx);
    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
