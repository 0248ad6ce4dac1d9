#![forbid(unsafe_code)]

//! Fixed-sequence input matcher.
//!
//! [`SequenceMatcher`] consumes a stream of discrete input tokens and
//! reports when the most recent `target.len()` tokens equal the target
//! sequence, in order. It is the logic behind the demo's cheat-code
//! listener but is generic over any token type comparable by equality.
//!
//! # Design
//!
//! ## Invariants
//! 1. The window never holds more than `target.len()` tokens; the oldest
//!    token is evicted first (FIFO).
//! 2. [`observe`](SequenceMatcher::observe) returns true iff the window
//!    equals the target element-wise after the new token is buffered.
//! 3. A true result clears the window, so the buffered tail cannot
//!    re-trigger on the very next call (unless the target has length 1).
//! 4. An empty target never matches and buffers nothing.
//!
//! ## Failure Modes
//! None. Any token is accepted; mismatched tokens simply slide the window.
//!
//! # Example
//!
//! ```
//! use enclave_core::sequence::SequenceMatcher;
//!
//! let mut matcher = SequenceMatcher::new(vec!['a', 'b']);
//! assert!(!matcher.observe('a'));
//! assert!(matcher.observe('b'));
//! // Window was cleared on the match.
//! assert!(!matcher.observe('b'));
//! ```

use std::collections::VecDeque;

/// Rolling-window matcher for a fixed token sequence.
///
/// Created once with an immutable target; fed one token per input event
/// via [`observe`](Self::observe). The caller acts on a true result (the
/// matcher itself has no side effects beyond its own window).
#[derive(Clone)]
pub struct SequenceMatcher<T> {
    target: Vec<T>,
    window: VecDeque<T>,
}

impl<T> std::fmt::Debug for SequenceMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("target_len", &self.target.len())
            .field("window_len", &self.window.len())
            .finish()
    }
}

impl<T: PartialEq> SequenceMatcher<T> {
    /// Create a matcher for the given target sequence.
    ///
    /// An empty target is allowed but can never match.
    #[must_use]
    pub fn new(target: Vec<T>) -> Self {
        let capacity = target.len();
        Self {
            target,
            window: VecDeque::with_capacity(capacity),
        }
    }

    /// Feed one observed token.
    ///
    /// Buffers the token (evicting the oldest if the window is full) and
    /// returns true iff the window now equals the target. On a match the
    /// window is cleared before returning, so an immediately following
    /// call cannot match on the same buffered tail.
    pub fn observe(&mut self, token: T) -> bool {
        if self.target.is_empty() {
            return false;
        }

        if self.window.len() == self.target.len() {
            self.window.pop_front();
        }
        self.window.push_back(token);

        if self.window.len() == self.target.len()
            && self.window.iter().eq(self.target.iter())
        {
            tracing::debug!(target_len = self.target.len(), "input sequence matched");
            self.window.clear();
            return true;
        }
        false
    }

    /// The tokens currently buffered, oldest first.
    ///
    /// Hosts use this to render a progress strip while the sequence is
    /// being entered.
    pub fn window(&self) -> impl Iterator<Item = &T> {
        self.window.iter()
    }

    /// Number of tokens currently buffered.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// The target sequence this matcher was built with.
    #[must_use]
    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// Clear the window, discarding any partial progress.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyCode;
    use proptest::prelude::*;

    fn cheat_code() -> Vec<KeyCode> {
        use KeyCode::{Char, Down, Left, Right, Up};
        vec![
            Up,
            Up,
            Down,
            Down,
            Left,
            Right,
            Left,
            Right,
            Char('b'),
            Char('a'),
        ]
    }

    #[test]
    fn exact_sequence_matches_on_final_token() {
        let target = cheat_code();
        let mut matcher = SequenceMatcher::new(target.clone());

        for (i, token) in target.into_iter().enumerate() {
            let matched = matcher.observe(token);
            if i == 9 {
                assert!(matched, "10th token should complete the sequence");
            } else {
                assert!(!matched, "token {i} should not complete the sequence");
            }
        }
    }

    #[test]
    fn window_is_cleared_after_match() {
        let mut matcher = SequenceMatcher::new(vec![1, 2, 3]);
        assert!(!matcher.observe(1));
        assert!(!matcher.observe(2));
        assert!(matcher.observe(3));
        assert_eq!(matcher.window_len(), 0);

        // The tail alone must not re-trigger.
        assert!(!matcher.observe(3));
    }

    #[test]
    fn single_token_target_can_retrigger() {
        let mut matcher = SequenceMatcher::new(vec!['x']);
        assert!(matcher.observe('x'));
        assert!(matcher.observe('x'));
    }

    #[test]
    fn noise_prefix_still_matches() {
        let mut matcher = SequenceMatcher::new(vec![7, 8]);
        assert!(!matcher.observe(1));
        assert!(!matcher.observe(7));
        assert!(!matcher.observe(7));
        assert!(matcher.observe(8));
    }

    #[test]
    fn wrong_order_does_not_match() {
        let mut matcher = SequenceMatcher::new(vec![1, 2, 3]);
        for token in [3, 2, 1, 2, 1, 3] {
            assert!(!matcher.observe(token));
        }
    }

    #[test]
    fn empty_target_never_matches() {
        let mut matcher: SequenceMatcher<u8> = SequenceMatcher::new(Vec::new());
        for token in 0..50 {
            assert!(!matcher.observe(token));
        }
        assert_eq!(matcher.window_len(), 0);
    }

    #[test]
    fn window_never_exceeds_target_len() {
        let mut matcher = SequenceMatcher::new(vec![1, 2, 3]);
        for token in 0..20 {
            let _ = matcher.observe(token);
            assert!(matcher.window_len() <= 3);
        }
    }

    #[test]
    fn window_iterates_oldest_first() {
        let mut matcher = SequenceMatcher::new(vec![9, 9, 9]);
        let _ = matcher.observe(1);
        let _ = matcher.observe(2);
        let _ = matcher.observe(3);
        let _ = matcher.observe(4);
        let buffered: Vec<_> = matcher.window().copied().collect();
        assert_eq!(buffered, vec![2, 3, 4]);
    }

    #[test]
    fn reset_discards_progress() {
        let mut matcher = SequenceMatcher::new(vec![1, 2]);
        assert!(!matcher.observe(1));
        matcher.reset();
        assert!(!matcher.observe(2));
    }

    #[test]
    fn target_accessor() {
        let matcher = SequenceMatcher::new(vec!['a', 'b']);
        assert_eq!(matcher.target(), &['a', 'b']);
    }

    #[test]
    fn debug_format() {
        let matcher = SequenceMatcher::new(vec![1, 2, 3]);
        let dbg = format!("{matcher:?}");
        assert!(dbg.contains("SequenceMatcher"));
    }

    proptest! {
        /// Oracle: replay the stream through a naive trailing-slice check.
        /// The matcher must agree, accounting for its clear-on-match rule.
        #[test]
        fn matches_exactly_when_tail_equals_target(
            target in prop::collection::vec(0u8..4, 1..5),
            stream in prop::collection::vec(0u8..4, 0..64),
        ) {
            let mut matcher = SequenceMatcher::new(target.clone());
            let mut tail: Vec<u8> = Vec::new();

            for &token in &stream {
                tail.push(token);
                if tail.len() > target.len() {
                    tail.remove(0);
                }
                let expected = tail == target;
                let got = matcher.observe(token);
                prop_assert_eq!(got, expected);
                if expected {
                    // Mirror the matcher's internal reset.
                    tail.clear();
                }
            }
        }
    }
}
