#![forbid(unsafe_code)]

//! Application model and message routing.
//!
//! The model owns the three core components and mutates itself in
//! response to key events and due timeline payloads. All timing enters
//! through caller-supplied [`Instant`]s, so the whole model is testable
//! without a terminal or a real clock.

use std::time::Instant;

use enclave_core::event::{Event, KeyCode, KeyEvent};
use enclave_core::responder::{CommandResponder, Effect};
use enclave_core::reveal::{RunHandle, Timeline};
use enclave_core::sequence::SequenceMatcher;
use unicode_segmentation::UnicodeSegmentation;

use crate::script;

// ---------------------------------------------------------------------------
// Sections and tabs
// ---------------------------------------------------------------------------

/// Top-level page sections, in nav order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Overview,
    Terminal,
    Interfaces,
    EasterEggs,
}

impl SectionId {
    /// All sections in nav order.
    pub const ALL: [SectionId; 4] = [
        SectionId::Overview,
        SectionId::Terminal,
        SectionId::Interfaces,
        SectionId::EasterEggs,
    ];

    /// Nav label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Terminal => "Terminal",
            Self::Interfaces => "Interfaces",
            Self::EasterEggs => "Easter Eggs",
        }
    }

    /// 1-indexed section lookup (the `1`-`4` keybindings and `--section`).
    #[must_use]
    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    #[must_use]
    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Next section, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous section, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Tabs inside the Interfaces section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceTab {
    Cli,
    Gui,
    Web,
}

impl InterfaceTab {
    pub const ALL: [InterfaceTab; 3] = [InterfaceTab::Cli, InterfaceTab::Gui, InterfaceTab::Web];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Cli => "CLI",
            Self::Gui => "GUI",
            Self::Web => "Web",
        }
    }

    /// Index into [`script::INTERFACE_LINES`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Timeline payloads: every timer-delayed mutation of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Append a line to the Terminal section transcript.
    Transcript(&'static str),
    /// Append one revealed grapheme to the console output.
    Type(String),
    /// Drop the transient visual effect.
    ClearEffect,
    /// Drop the cheat-code activation banner.
    ClearBanner,
    /// Drop the brief whole-page activation flash.
    ClearFlash,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// The whole page state.
pub struct AppModel {
    pub section: SectionId,
    pub interface: InterfaceTab,
    /// Console line editor contents.
    pub input: String,
    /// Console output revealed so far.
    pub console: String,
    /// Terminal section transcript lines.
    pub transcript: Vec<String>,
    /// Active transient effect, if any.
    pub effect: Option<Effect>,
    /// Cheat-code activation banner, if up.
    pub banner: Option<&'static str>,
    /// Whole-page flash raised briefly on activation.
    pub flash: bool,
    pub matcher: SequenceMatcher<KeyCode>,
    pub responder: CommandResponder,
    pub timeline: Timeline<Msg>,
    /// Pending typewriter run, cancelled when a new reply starts.
    typing_run: Option<RunHandle>,
    /// Pending effect clear, cancelled when a new effect starts.
    effect_run: Option<RunHandle>,
    pub dirty: bool,
    pub quit: bool,
}

impl AppModel {
    /// Build the initial model. `seed` pins the responder's random picks.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let catalog = script::catalog();
        let responder = match seed {
            Some(seed) => CommandResponder::with_seed(catalog, seed),
            None => CommandResponder::new(catalog),
        };
        Self {
            section: SectionId::Overview,
            interface: InterfaceTab::Cli,
            input: String::new(),
            console: String::new(),
            transcript: script::TRANSCRIPT_SEED.iter().map(|&l| l.to_owned()).collect(),
            effect: None,
            banner: None,
            flash: false,
            matcher: SequenceMatcher::new(script::cheat_code()),
            responder,
            timeline: Timeline::new(),
            typing_run: None,
            effect_run: None,
            dirty: true,
            quit: false,
        }
    }

    /// Schedule the startup transcript.
    pub fn start(&mut self, now: Instant) {
        let steps = script::transcript_steps()
            .into_iter()
            .map(|(delay, line)| (delay, Msg::Transcript(line)));
        self.timeline.run(now, steps);
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Resize { .. } => self.dirty = true,
        }
    }

    /// Route one key event.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if !key.is_press() {
            return;
        }
        if key.ctrl() && key.is_char('c') {
            self.quit = true;
            return;
        }

        // The cheat-code listener sees every press, whatever has focus.
        if self.matcher.observe(key.code) {
            self.activate_cheat(now);
        }
        self.dirty = true;

        match key.code {
            KeyCode::Tab => self.section = self.section.next(),
            KeyCode::BackTab => self.section = self.section.prev(),
            KeyCode::Left if self.section == SectionId::Interfaces => {
                self.interface = self.interface.prev();
            }
            KeyCode::Right if self.section == SectionId::Interfaces => {
                self.interface = self.interface.next();
            }
            KeyCode::Char(c) if self.section == SectionId::EasterEggs => {
                self.input.push(c);
            }
            KeyCode::Backspace if self.section == SectionId::EasterEggs => {
                self.input.pop();
            }
            KeyCode::Enter if self.section == SectionId::EasterEggs => {
                self.submit_command(now);
            }
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char(c) => {
                if let Some(section) = c.to_digit(10).and_then(|n| SectionId::from_number(n as usize)) {
                    self.section = section;
                }
            }
            _ => {}
        }
    }

    /// Apply one due timeline payload.
    pub fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::Transcript(line) => self.transcript.push(line.to_owned()),
            Msg::Type(grapheme) => self.console.push_str(&grapheme),
            Msg::ClearEffect => self.effect = None,
            Msg::ClearBanner => self.banner = None,
            Msg::ClearFlash => self.flash = false,
        }
        self.dirty = true;
    }

    /// Current cheat-code progress, as display symbols.
    #[must_use]
    pub fn cheat_progress(&self) -> String {
        self.matcher
            .window()
            .map(|&code| script::key_symbol(code))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn submit_command(&mut self, now: Instant) {
        let input = std::mem::take(&mut self.input);
        let Some(reply) = self.responder.respond(&input) else {
            return;
        };
        self.reveal_reply(&reply.text, script::TYPE_INTERVAL, now);
        if let Some(effect) = reply.effect {
            self.apply_effect(effect, now);
        }
    }

    fn activate_cheat(&mut self, now: Instant) {
        tracing::debug!("cheat code activated");
        self.banner = Some(script::BANNER_TEXT);
        self.timeline.schedule(now, script::BANNER_HOLD, Msg::ClearBanner);
        self.flash = true;
        self.timeline.schedule(now, script::FLASH_HOLD, Msg::ClearFlash);

        if let Some(reply) = self.responder.respond("/konami") {
            self.reveal_reply(&reply.text, script::CHEAT_TYPE_INTERVAL, now);
        }
        self.apply_effect(Effect::Matrix, now);
    }

    fn reveal_reply(&mut self, text: &str, interval: std::time::Duration, now: Instant) {
        if let Some(previous) = self.typing_run.take() {
            self.timeline.cancel(previous);
        }
        self.console.clear();
        let graphemes: Vec<Msg> = text
            .graphemes(true)
            .map(|g| Msg::Type(g.to_owned()))
            .collect();
        self.typing_run = Some(self.timeline.run_staggered(now, interval, graphemes));
    }

    fn apply_effect(&mut self, effect: Effect, now: Instant) {
        if let Some(previous) = self.effect_run.take() {
            self.timeline.cancel(previous);
        }
        self.effect = Some(effect);
        self.effect_run = Some(
            self.timeline
                .schedule(now, effect.duration(), Msg::ClearEffect),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn model() -> AppModel {
        AppModel::new(Some(42))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_str(model: &mut AppModel, text: &str, now: Instant) {
        for c in text.chars() {
            model.handle_key(press(KeyCode::Char(c)), now);
        }
    }

    /// Drain the timeline far in the future and apply everything.
    fn settle(model: &mut AppModel, from: Instant) {
        for msg in model.timeline.poll(from + Duration::from_secs(60)) {
            model.apply(msg);
        }
    }

    #[test]
    fn number_keys_switch_sections() {
        let mut m = model();
        let t = Instant::now();
        m.handle_key(press(KeyCode::Char('3')), t);
        assert_eq!(m.section, SectionId::Interfaces);
        m.handle_key(press(KeyCode::Char('1')), t);
        assert_eq!(m.section, SectionId::Overview);
    }

    #[test]
    fn tab_cycles_and_wraps() {
        let mut m = model();
        let t = Instant::now();
        for _ in 0..SectionId::ALL.len() {
            m.handle_key(press(KeyCode::Tab), t);
        }
        assert_eq!(m.section, SectionId::Overview);
        m.handle_key(press(KeyCode::BackTab), t);
        assert_eq!(m.section, SectionId::EasterEggs);
    }

    #[test]
    fn arrows_switch_interface_tabs_only_in_interfaces() {
        let mut m = model();
        let t = Instant::now();
        m.handle_key(press(KeyCode::Right), t);
        assert_eq!(m.interface, InterfaceTab::Cli);

        m.section = SectionId::Interfaces;
        m.handle_key(press(KeyCode::Right), t);
        assert_eq!(m.interface, InterfaceTab::Gui);
        m.handle_key(press(KeyCode::Left), t);
        assert_eq!(m.interface, InterfaceTab::Cli);
    }

    #[test]
    fn console_edits_input_and_submits() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;

        type_str(&mut m, "/jokee", t);
        m.handle_key(press(KeyCode::Backspace), t);
        assert_eq!(m.input, "/joke");

        m.handle_key(press(KeyCode::Enter), t);
        assert!(m.input.is_empty());
        assert!(m.timeline.pending() > 0, "reply should be typing out");

        settle(&mut m, t);
        let pool = m.responder.catalog().replies("/joke").unwrap().to_vec();
        assert!(pool.contains(&m.console));
    }

    #[test]
    fn unknown_command_reveals_fallback() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;
        type_str(&mut m, "/nope", t);
        m.handle_key(press(KeyCode::Enter), t);
        settle(&mut m, t);
        assert!(m.console.starts_with("Unknown command: /nope"));
        assert!(m.console.contains("/konami"));
    }

    #[test]
    fn blank_submit_is_a_noop() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;
        m.handle_key(press(KeyCode::Enter), t);
        assert!(m.timeline.is_idle());
        assert!(m.console.is_empty());
    }

    #[test]
    fn boom_command_applies_and_clears_effect() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;
        type_str(&mut m, "/boom", t);
        m.handle_key(press(KeyCode::Enter), t);
        assert_eq!(m.effect, Some(Effect::Boom));

        // Not cleared yet just before the effect duration elapses.
        for msg in m.timeline.poll(t + Duration::from_millis(999)) {
            m.apply(msg);
        }
        assert_eq!(m.effect, Some(Effect::Boom));

        for msg in m.timeline.poll(t + Duration::from_millis(1000)) {
            m.apply(msg);
        }
        assert_eq!(m.effect, None);
    }

    #[test]
    fn cheat_code_raises_banner_effect_and_reply() {
        let mut m = model();
        let t = Instant::now();
        for code in script::cheat_code() {
            m.handle_key(press(code), t);
        }
        assert_eq!(m.banner, Some(script::BANNER_TEXT));
        assert_eq!(m.effect, Some(Effect::Matrix));
        assert!(m.flash);
        assert!(m.cheat_progress().is_empty());

        settle(&mut m, t);
        assert!(m.console.contains("CHEAT MODE ENABLED"));
        assert_eq!(m.banner, None);
        assert_eq!(m.effect, None);
        assert!(!m.flash);
    }

    #[test]
    fn activation_flash_clears_before_the_matrix_tint() {
        let mut m = model();
        let t = Instant::now();
        for code in script::cheat_code() {
            m.handle_key(press(code), t);
        }
        assert!(m.flash);

        for msg in m.timeline.poll(t + Duration::from_millis(499)) {
            m.apply(msg);
        }
        assert!(m.flash);

        for msg in m.timeline.poll(t + Duration::from_millis(500)) {
            m.apply(msg);
        }
        assert!(!m.flash);
        // The matrix tint outlives the flash.
        assert_eq!(m.effect, Some(Effect::Matrix));
    }

    #[test]
    fn cheat_progress_renders_symbols() {
        let mut m = model();
        let t = Instant::now();
        m.handle_key(press(KeyCode::Up), t);
        m.handle_key(press(KeyCode::Up), t);
        m.handle_key(press(KeyCode::Down), t);
        assert_eq!(m.cheat_progress(), "↑ ↑ ↓");
    }

    #[test]
    fn new_reply_cancels_previous_typewriter() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;

        type_str(&mut m, "/matrix", t);
        m.handle_key(press(KeyCode::Enter), t);

        // Mid-reveal, fire a second command.
        for msg in m.timeline.poll(t + Duration::from_millis(120)) {
            m.apply(msg);
        }
        let t2 = t + Duration::from_millis(200);
        type_str(&mut m, "/nope", t2);
        m.handle_key(press(KeyCode::Enter), t2);

        settle(&mut m, t2);
        // Only the second reply's text survives, fully revealed.
        assert!(m.console.starts_with("Unknown command:"));
    }

    #[test]
    fn startup_transcript_plays_in_order() {
        let mut m = model();
        let t = Instant::now();
        let seeded = m.transcript.len();
        m.start(t);

        for msg in m.timeline.poll(t + Duration::from_secs(3)) {
            m.apply(msg);
        }
        assert_eq!(m.transcript.len(), seeded + 1);
        assert_eq!(m.transcript.last().unwrap(), "enclave> /status");

        for msg in m.timeline.poll(t + Duration::from_secs(4)) {
            m.apply(msg);
        }
        assert_eq!(m.transcript.len(), seeded + 5);
        assert!(m.transcript.last().unwrap().contains("1,337"));
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let mut m = model();
        let t = Instant::now();
        m.handle_key(press(KeyCode::Char('q')), t);
        assert!(m.quit);

        let mut m = model();
        m.handle_key(
            press(KeyCode::Char('c')).with_modifiers(enclave_core::event::Modifiers::CTRL),
            t,
        );
        assert!(m.quit);
    }

    #[test]
    fn q_types_into_console_instead_of_quitting() {
        let mut m = model();
        let t = Instant::now();
        m.section = SectionId::EasterEggs;
        m.handle_key(press(KeyCode::Char('q')), t);
        assert!(!m.quit);
        assert_eq!(m.input, "q");
    }
}
