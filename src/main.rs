mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dino_runner::compute::RngSource;
use dino_runner::session::FixedRateClock;
use dino_runner::{Config, GameSession};

use crate::display::TerminalRenderer;
use crate::input::TerminalInput;

#[derive(Parser)]
#[command(name = "dino_runner")]
#[command(about = "Jump and crouch past obstacles and the pursuer for as long as you can")]
struct Cli {
    /// Seed the spawn RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate
    #[arg(long, default_value_t = dino_runner::config::FPS)]
    fps: u32,

    /// Remove pursuers once they leave the left edge of the field
    #[arg(long)]
    cull_pursuers: bool,

    /// Where to write logs (the terminal is taken over by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("dino_runner.log"));
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_file)?;
    info!("logging to {}", log_path.display());

    let config = Config {
        fps: cli.fps.max(1),
        cull_offscreen_pursuers: cli.cull_pursuers,
        ..Config::default()
    };
    let rng = match cli.seed {
        Some(seed) => {
            info!("spawn seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // Sprite problems abort before the terminal is touched.
    let session = GameSession::new(config).context("building sprites")?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = play(session, &mut out, rx, keyboard_enhanced, rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("session aborted: {:#}", e);
    }
    result
}

fn play(
    mut session: GameSession,
    out: &mut BufWriter<std::io::Stdout>,
    rx: mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    rng: StdRng,
) -> Result<()> {
    let config = session.config().clone();
    let mut renderer =
        TerminalRenderer::new(out, config.field_width, config.field_height, config.ground_y())
            .context("querying terminal size")?;
    let mut input = TerminalInput::new(rx, keyboard_enhanced);
    let mut clock = FixedRateClock::new(config.fps);
    let mut rng = RngSource(rng);

    session.run(&mut input, &mut renderer, &mut clock, &mut rng)?;
    Ok(())
}
