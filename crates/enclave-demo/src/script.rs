#![forbid(unsafe_code)]

//! Canned demo content: the command catalog, the cheat-code target, the
//! startup transcript, and the timing constants the page animates with.

use std::time::Duration;

use enclave_core::event::KeyCode;
use enclave_core::responder::{Catalog, Effect};

/// Reveal interval for typed-out command replies.
pub const TYPE_INTERVAL: Duration = Duration::from_millis(50);

/// Faster reveal used for the cheat-code activation message.
pub const CHEAT_TYPE_INTERVAL: Duration = Duration::from_millis(30);

/// How long the activation banner stays up.
pub const BANNER_HOLD: Duration = Duration::from_secs(5);

/// How long the whole-page flash on activation lasts.
pub const FLASH_HOLD: Duration = Duration::from_millis(500);

/// Banner shown while the cheat code is active.
pub const BANNER_TEXT: &str = "🎮 KONAMI CODE ACTIVATED! 🎮";

/// The classic cheat-code key sequence.
pub fn cheat_code() -> Vec<KeyCode> {
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

/// Symbol rendered in the progress strip for one buffered key.
pub fn key_symbol(code: KeyCode) -> &'static str {
    match code {
        KeyCode::Up => "↑",
        KeyCode::Down => "↓",
        KeyCode::Left => "←",
        KeyCode::Right => "→",
        KeyCode::Char('b') => "B",
        KeyCode::Char('a') => "A",
        _ => "?",
    }
}

/// The easter-egg console catalog.
pub fn catalog() -> Catalog {
    Catalog::builder()
        .command(
            "/joke",
            [
                "Why don't programmers like nature? Too many bugs! 🐛",
                "How many programmers does it take to change a light bulb? None, that's a hardware problem! 💡",
                "Why do programmers prefer dark mode? Because light attracts bugs! 🌙",
                "What's a programmer's favorite hangout place? The Foo Bar! 🍺",
                "Why did the programmer quit his job? He didn't get arrays! 📊",
            ],
        )
        .command(
            "/ascii",
            [
                "( ͡° ͜ʖ ͡°)",
                "┻━┻ ︵ヽ(`Д´)ﾉ︵ ┻━┻",
                "🔐 ENCRYPTED ASCII ART 🔐\n░░░▓▓▓░░░\n░▓▓▓▓▓▓▓░\n▓▓▓▓▓▓▓▓▓\n░▓▓▓▓▓▓▓░\n░░░▓▓▓░░░",
                "    /\\_/\\  \n   ( o.o ) \n    > ^ <",
                "┌─┐┬ ┬┌─┐┬─┐\n├─┤├─┤├┤ ├┬┘\n┴ ┴┴ ┴└─┘┴└─",
            ],
        )
        .command(
            "/boom",
            [
                "💥✨🔥💣⚡🌟💫🎆",
                "💥 BOOM! 💥\n🎇✨🎆✨🎇\n💫⚡💫⚡💫\n🔥🌟🔥🌟🔥",
                "🚀💥 EXPLOSIVE ENCRYPTION! 💥🚀\n⚡⚡⚡⚡⚡⚡⚡⚡⚡⚡\n🔥 Messages secured with a BANG! 🔥",
            ],
        )
        .with_effect(Effect::Boom)
        .command(
            "/matrix",
            ["🔋 ENTERING THE MATRIX...\n01001000 01100101 01101100 01101100 01101111\n🔐 Reality is just encrypted data 🔐\n💊 Take the red pill for ultimate security 💊"],
        )
        .with_effect(Effect::Matrix)
        .command(
            "/konami",
            ["🎮 KONAMI CODE ACTIVATED!\n🚀 CHEAT MODE ENABLED 🚀\n🔓 All encryption algorithms unlocked!\n✨ You are now a crypto wizard! ✨"],
        )
        .build()
}

/// Startup transcript for the Terminal section: the `/status` prompt at
/// +3s, then the status block at +4s (same instant, list order).
pub fn transcript_steps() -> Vec<(Duration, &'static str)> {
    let s = Duration::from_secs;
    vec![
        (s(3), "enclave> /status"),
        (s(4), "🔐 Encryption: Active (RSA-2048 + AES-256)"),
        (s(4), "🛡️ P2P Connection: Established"),
        (s(4), "👥 Active Users: 2"),
        (s(4), "📊 Messages Encrypted: 1,337"),
    ]
}

/// Opening lines shown in the Terminal section before the script runs.
pub const TRANSCRIPT_SEED: &[&str] = &[
    "Enclave Messenger v1.0",
    "Type /help for commands",
];

/// Copy for the Overview section.
pub const OVERVIEW_LINES: &[&str] = &[
    "Enclave Messenger — end-to-end encrypted chat for people who read RFCs for fun.",
    "",
    "  • Hybrid RSA-2048 + AES-256 envelope per message",
    "  • Peer-to-peer over your LAN, no server in the middle",
    "  • CLI, GUI, and web front ends over one core",
    "",
    "This demo is all theater: no keys are generated, nothing is encrypted,",
    "and nothing leaves this terminal.",
];

/// Copy for the interface tabs, in tab order (CLI, GUI, Web).
pub const INTERFACE_LINES: [&[&str]; 3] = [
    &[
        "$ enclave-messenger --port 8888",
        "🟢 Server listening on port 8888",
        "📡 Waiting for connections...",
        "",
        "Slash commands, contact list, trust indicators — all in your terminal.",
    ],
    &[
        "A desktop window with the same core underneath:",
        "contact sidebar, conversation pane, key-exchange button.",
        "",
        "Every message shows its encryption badge.",
    ],
    &[
        "Browser client served from localhost:",
        "same protocol, same envelope, plus this very pitch page.",
    ],
];
