mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroids::compute::{ScoreSummary, Session, StepOutcome};
use asteroids::config::GameConfig;
use asteroids::input::InputState;
use asteroids::Result;

/// Asteroids in the terminal.
///
/// Player 1: W/S thrust forward/backward, A/D rotate, Space shoots.
/// Player 2: Up/Down thrust, Left/Right rotate, Enter shoots.
/// Q or Esc quits.
#[derive(Parser, Debug)]
#[command(name = "asteroids")]
struct Args {
    /// Add a second player on the arrow keys
    #[arg(short, long)]
    multiplayer: bool,

    /// Print the per-tier score breakdown at game over
    #[arg(short, long)]
    verbose: bool,

    /// Seed for asteroid trajectories (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until quit (`None`) or game over (`Some(summary)`).
///
/// Every frame drains all pending key events, advances the session by the
/// real time since the previous frame, renders, then sleeps out the rest of
/// the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<Option<ScoreSummary>> {
    let frame = session.config.frame_duration();
    let mut last = Instant::now();
    let mut events: Vec<KeyEvent> = Vec::new();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        events.clear();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key) = ev {
                events.push(key);
            }
        }

        match session.step(&events, dt, rng) {
            StepOutcome::Continue => {}
            StepOutcome::Quit => return Ok(None),
            StepOutcome::GameOver(summary) => return Ok(Some(summary)),
        }

        display::render(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig {
        multiplayer: args.multiplayer,
        ..GameConfig::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events let two players hold keys at once without relying
    // on OS key repeat.  Terminals without the protocol fall back to the
    // hold window, so only trust releases when the terminal says it sends them.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

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

    let mut session = Session::new(config);
    session.input = InputState::with_release_events(keyboard_enhanced);
    let result = game_loop(&mut out, &mut session, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Some(summary) = result? {
        println!("\nGame over!\n");
        println!("{}", summary.render(args.verbose));
    }
    Ok(())
}
