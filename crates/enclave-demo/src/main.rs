#![forbid(unsafe_code)]

//! Enclave Messenger demo binary entry point.

use std::io;
use std::time::{Duration, Instant};

mod app;
mod cli;
mod script;
mod terminal;
mod view;

use app::{AppModel, SectionId};

/// Fallback poll timeout when no timeline step is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    if let Err(e) = run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> io::Result<()> {
    let mut model = AppModel::new(opts.seed);
    if let Some(section) = SectionId::from_number(opts.section) {
        model.section = section;
    }
    model.start(Instant::now());

    let session = terminal::Session::new(opts.alt_screen)?;
    let mut out = io::stdout();

    while !model.quit {
        if model.dirty {
            view::draw(&mut out, &model)?;
            model.dirty = false;
        }

        // Sleep until input arrives or the next reveal step is due.
        let timeout = model
            .timeline
            .next_due()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);
        if let Some(event) = session.poll_event(timeout)? {
            model.handle_event(event, Instant::now());
        }

        for msg in model.timeline.poll(Instant::now()) {
            model.apply(msg);
        }
    }

    Ok(())
}

/// Route tracing output to a file when `ENCLAVE_DEMO_LOG` is set, so log
/// lines never land on the raw-mode screen. `RUST_LOG` filters as usual.
fn init_logging() {
    let Ok(path) = std::env::var("ENCLAVE_DEMO_LOG") else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => eprintln!("warning: cannot open log file {path}: {e}"),
    }
}
