#![forbid(unsafe_code)]

//! Command responder for the easter-egg console.
//!
//! [`CommandResponder`] maps a typed command to one randomly chosen reply
//! from a fixed [`Catalog`]. Lookups are case-insensitive on the trimmed
//! input; unknown commands get a fixed fallback listing the known keys.
//! Some commands carry an [`Effect`] describing a transient visual
//! treatment; the responder only returns it as data, the host applies it.
//!
//! # Design
//!
//! ## Invariants
//! 1. Every catalog entry has at least one reply (enforced by the
//!    builder; entries with zero replies are dropped).
//! 2. Catalog keys are stored normalized (trimmed, lowercased) and listed
//!    in insertion order.
//! 3. The random pick is the only non-determinism; a seeded responder is
//!    fully reproducible.
//!
//! ## Failure Modes
//! None. Unknown commands are a handled case, not an error; blank input
//! is a no-op (`None`).

use std::time::{SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Transient visual treatment attached to a reply.
///
/// Pure data: the host decides what "matrix" or "boom" looks like and
/// schedules the clear after [`duration`](Effect::duration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Green-rain flash, held for three seconds.
    Matrix,
    /// Shake/flash burst, held for one second.
    Boom,
}

impl Effect {
    /// How long the host should hold the effect before clearing it.
    #[must_use]
    pub const fn duration(&self) -> std::time::Duration {
        match self {
            Self::Matrix => std::time::Duration::from_millis(3000),
            Self::Boom => std::time::Duration::from_millis(1000),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CatalogEntry {
    command: String,
    replies: Vec<String>,
    effect: Option<Effect>,
}

/// Static command catalog: ordered mapping from a normalized command key
/// to its candidate replies. Built once, read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder {
            catalog: Self::default(),
        }
    }

    /// Known command keys, in insertion order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.command.as_str())
    }

    /// Number of commands in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All candidate replies for `command` (already-normalized key).
    ///
    /// Tests use this to assert a random pick landed inside the pool.
    #[must_use]
    pub fn replies(&self, command: &str) -> Option<&[String]> {
        self.lookup(command).map(|entry| entry.replies.as_slice())
    }

    fn lookup(&self, normalized: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.command == normalized)
    }
}

/// Builder for [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Add a command with its candidate replies.
    ///
    /// The command key is normalized (trimmed, lowercased). An empty
    /// reply list violates the catalog invariant and the entry is
    /// dropped.
    #[must_use]
    pub fn command<S, I, R>(mut self, command: S, replies: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        if replies.is_empty() {
            return self;
        }
        self.catalog.entries.push(CatalogEntry {
            command: normalize(command.as_ref()),
            replies,
            effect: None,
        });
        self
    }

    /// Attach an effect to the most recently added command.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        if let Some(entry) = self.catalog.entries.last_mut() {
            entry.effect = Some(effect);
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Catalog {
        self.catalog
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

/// A reply produced by [`CommandResponder::respond`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The text to reveal.
    pub text: String,
    /// Transient visual treatment, if the command carries one.
    pub effect: Option<Effect>,
}

/// Maps typed commands to catalog replies.
pub struct CommandResponder {
    catalog: Catalog,
    rng: XorShift64,
}

impl std::fmt::Debug for CommandResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandResponder")
            .field("commands", &self.catalog.len())
            .finish()
    }
}

impl CommandResponder {
    /// Create a responder seeded from the system clock.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()))
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::with_seed(catalog, seed)
    }

    /// Create a responder with a fixed seed (deterministic pick order).
    #[must_use]
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: XorShift64::new(seed),
        }
    }

    /// Respond to raw user input.
    ///
    /// The input is trimmed and lowercased before lookup. Returns `None`
    /// for blank input; a uniformly random candidate for a known command;
    /// a fixed fallback listing the known keys otherwise.
    pub fn respond(&mut self, input: &str) -> Option<Reply> {
        let command = normalize(input);
        if command.is_empty() {
            return None;
        }

        if let Some(entry) = self.catalog.lookup(&command) {
            let pick = self.rng.pick(entry.replies.len());
            return Some(Reply {
                text: entry.replies[pick].clone(),
                effect: entry.effect,
            });
        }

        tracing::trace!(%command, "unknown console command");
        Some(Reply {
            text: self.fallback(&command),
            effect: None,
        })
    }

    /// The catalog this responder serves.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn fallback(&self, command: &str) -> String {
        let known: Vec<&str> = self.catalog.commands().collect();
        format!("Unknown command: {command}\nTry: {}", known.join(", "))
    }
}

// ---------------------------------------------------------------------------
// PRNG
// ---------------------------------------------------------------------------

/// xorshift64: small deterministic PRNG, good enough for picking a reply.
#[derive(Debug, Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // xorshift has no escape from the all-zero state.
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Pick an index in `[0, len)`. `len` must be non-zero, which the
    /// catalog invariant guarantees.
    fn pick(&mut self, len: usize) -> usize {
        (self.next() % len as u64) as usize
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
