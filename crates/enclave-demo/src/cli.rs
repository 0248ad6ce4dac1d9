#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via `ENCLAVE_DEMO_*`.

use std::env;
use std::process;

use crate::app::SectionId;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Enclave Messenger Demo — the pitch page, in your terminal

USAGE:
    enclave-demo [OPTIONS]

OPTIONS:
    --section=N          Start on section N, 1-indexed (default: 1)
    --seed=N             Fix the random seed for command replies
    --no-alt-screen      Draw on the main screen instead of the alternate one
    --help, -h           Show this help message
    --version, -V        Show version

SECTIONS:
    1  Overview      What Enclave Messenger is (allegedly)
    2  Terminal      A scripted /status session
    3  Interfaces    CLI, GUI, and web front ends
    4  Easter Eggs   The command console (/joke, /ascii, /boom, /matrix, /konami)

KEYBINDINGS:
    1-4             Jump to a section (outside the console)
    Tab / Shift-Tab Cycle sections
    Left / Right    Switch interface tab
    q / Ctrl+C      Quit
    ...and a certain ten-key sequence does something special.

ENVIRONMENT VARIABLES:
    ENCLAVE_DEMO_SECTION   Override --section
    ENCLAVE_DEMO_SEED      Override --seed
    ENCLAVE_DEMO_LOG       Write tracing output to this file (RUST_LOG filters)";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// 1-indexed starting section.
    pub section: usize,
    /// Fixed seed for the command responder, if requested.
    pub seed: Option<u64>,
    /// Whether to use the alternate screen.
    pub alt_screen: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            section: 1,
            seed: None,
            alt_screen: true,
        }
    }
}

impl Opts {
    /// Parse from `std::env::args`, applying env overrides.
    ///
    /// Exits the process on `--help`/`--version` or an unknown flag.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(value) = env::var("ENCLAVE_DEMO_SECTION")
            && let Some(section) = parse_section(&value)
        {
            opts.section = section;
        }
        if let Ok(value) = env::var("ENCLAVE_DEMO_SEED")
            && let Ok(seed) = value.parse()
        {
            opts.seed = Some(seed);
        }

        for arg in env::args().skip(1) {
            if let Some(value) = arg.strip_prefix("--section=") {
                match parse_section(value) {
                    Some(section) => opts.section = section,
                    None => fail(&format!(
                        "invalid --section value: {value} (expected 1-{})",
                        SectionId::ALL.len()
                    )),
                }
            } else if let Some(value) = arg.strip_prefix("--seed=") {
                match value.parse() {
                    Ok(seed) => opts.seed = Some(seed),
                    Err(_) => fail(&format!("invalid --seed value: {value}")),
                }
            } else {
                match arg.as_str() {
                    "--no-alt-screen" => opts.alt_screen = false,
                    "--help" | "-h" => {
                        println!("{HELP_TEXT}");
                        process::exit(0);
                    }
                    "--version" | "-V" => {
                        println!("enclave-demo {VERSION}");
                        process::exit(0);
                    }
                    other => fail(&format!("unknown argument: {other}")),
                }
            }
        }

        opts
    }
}

/// Parse a 1-indexed section number, rejecting anything outside the nav.
fn parse_section(value: &str) -> Option<usize> {
    let section: usize = value.parse().ok()?;
    (1..=SectionId::ALL.len())
        .contains(&section)
        .then_some(section)
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    eprintln!("Run with --help for usage.");
    process::exit(2);
}
