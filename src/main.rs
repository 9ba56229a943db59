use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_defender::consts::TARGET_FPS;
use space_defender::display::{FrameClock, TerminalCanvas, TerminalInput};
use space_defender::GameLoop;

/// Arcade shooter in the terminal: survive the waves, beat the boss.
#[derive(Parser, Debug)]
#[command(name = "space_defender", version, about, long_about = None)]
struct Args {
    /// Seed for enemy/power-up placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate cap
    #[arg(long, default_value_t = TARGET_FPS)]
    fps: u32,

    /// Write logs here (the terminal itself is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to a file or nowhere. Without `--log-file`, setting `RUST_LOG`
/// still turns logging on, into `space_defender.log`.
fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let path = match log_file {
        Some(path) => path,
        None if std::env::var_os("RUST_LOG").is_some() => PathBuf::from("space_defender.log"),
        None => return Ok(()),
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting at {} fps with seed {}", args.fps, seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the protocol ignore it
    // and input falls back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, seed, args.fps);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let (score, wave) = result?;
    println!("Final score: {} (wave {})", score, wave);
    Ok(())
}

/// Returns the final score and wave.
fn run<W: Write>(out: &mut W, seed: u64, fps: u32) -> Result<(u32, u32)> {
    let canvas = TerminalCanvas::for_terminal(out).context("failed to set up the screen")?;
    let mut game = GameLoop::new(
        TerminalInput::new(),
        canvas,
        FrameClock::new(fps),
        StdRng::seed_from_u64(seed),
    );
    game.run().context("game loop failed")?;
    Ok((game.state().score, game.state().wave))
}
