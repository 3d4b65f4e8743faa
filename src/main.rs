use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use canvas_shooter::config;
use canvas_shooter::display::{self, TerminalCanvas};
use canvas_shooter::frame_loop;
use canvas_shooter::input;
use canvas_shooter::session::{FrameStatus, Session};

/// Logs go to a file: stdout belongs to the game screen.
fn init_tracing() {
    let path = config::log_file();
    let Ok(file) = File::create(&path) else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
}

/// Chain a hook in front of the default one: log the panic and give the
/// terminal back before the message is printed.
fn install_panic_hook(keyboard_enhanced: bool) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
        let _ = terminal::disable_raw_mode();
        let _ = display::restore_terminal(&mut stdout(), keyboard_enhanced);
        previous(info);
    }));
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    // No surface to draw on: the loop never starts.
    let canvas = match terminal::size() {
        Ok((cols, rows)) => TerminalCanvas::fit(cols, rows),
        Err(err) => {
            warn!(%err, "terminal size unavailable");
            None
        }
    };
    let Some(canvas) = canvas else {
        warn!("terminal too small for the playfield; not starting");
        return Ok(());
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    install_panic_hook(keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
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

    let result = run(&mut out, canvas, &rx);

    // Always restore the terminal
    let _ = display::restore_terminal(&mut out, keyboard_enhanced);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(%err, "terminal error");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    mut canvas: TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = match config::rng_seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (mut session, handle) = Session::start(config::contact_card(), config::key_hold_frames());
    info!(
        cols = canvas.cols(),
        rows = canvas.rows(),
        fps = config::frame_rate(),
        "playfield ready"
    );

    frame_loop::run(&handle, config::frame_interval(), || {
        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(key_event) = ev {
                if let Some((key, action)) = input::translate(&key_event) {
                    session.handle_key(key, action);
                }
            }
        }

        match session.frame(&mut rng, &mut canvas) {
            FrameStatus::Stopped => Ok(()),
            FrameStatus::Running | FrameStatus::Halted => display::present(out, &canvas, &session),
        }
    })?;

    info!(
        score = session.scoreboard.score,
        high_score = session.scoreboard.high_score,
        "session ended"
    );
    Ok(())
}
