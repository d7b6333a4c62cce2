mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};

use flappy_game::config::GameConfig;
use flappy_game::runner::GameRunner;
use flappy_game::session::GameSession;

/// Longest the loop sleeps between redraws when no tick is pending.
const IDLE_FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Flappy bird in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file overriding any of the game constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for gap placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Command {
    Action,
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('k') => {
            Some(Command::Action)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, run due ticks, draw, then sleep until the next tick (or one
/// idle frame when nothing is scheduled).
fn game_loop<W: Write>(
    out: &mut W,
    runner: &mut GameRunner,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                match command_for(key) {
                    Some(Command::Action) => runner.on_action(Instant::now()),
                    Some(Command::Quit) => {
                        runner.shutdown();
                        return Ok(());
                    }
                    None => {}
                }
            }
        }

        runner.pump(Instant::now());

        let (width, height) = terminal::size()?;
        display::render(out, &runner.snapshot(), width, height)?;

        let now = Instant::now();
        let wake = runner
            .next_deadline()
            .map_or(now + IDLE_FRAME, |deadline| deadline.min(now + IDLE_FRAME));
        if wake > now {
            thread::sleep(wake - now);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let session = GameSession::with_seed(config, seed).context("building game session")?;
    let mut runner = GameRunner::new(session);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut runner, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}
