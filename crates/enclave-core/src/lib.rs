#![forbid(unsafe_code)]

//! Core logic for the Enclave Messenger demo.
//!
//! Three small, independent components, each owned by the host and fed
//! explicitly (no ambient globals):
//!
//! - [`sequence::SequenceMatcher`] — detects a fixed token sequence in an
//!   input stream (the cheat-code listener).
//! - [`reveal::Timeline`] — schedules staggered, cancellable reveal steps
//!   against caller-supplied time (the animation sequencer).
//! - [`responder::CommandResponder`] — maps typed commands to canned
//!   replies with a seedable random pick (the easter-egg console).
//!
//! None of these components perform I/O, touch the presentation tree, or
//! spawn threads. The host drives them from its own event loop and applies
//! the data they return.

pub mod event;
pub mod responder;
pub mod reveal;
pub mod sequence;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use responder::{Catalog, CatalogBuilder, CommandResponder, Effect, Reply};
pub use reveal::{RunHandle, Timeline};
pub use sequence::SequenceMatcher;
