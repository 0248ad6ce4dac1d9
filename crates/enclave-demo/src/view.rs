#![forbid(unsafe_code)]

//! Rendering: one full-screen frame per dirty model.
//!
//! Pure presentation; every decision about *what* is shown was already
//! made in the model. The only styling rule of note is the transient
//! effect, which tints the whole frame while it is active.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, queue};
use unicode_width::UnicodeWidthStr;

use enclave_core::responder::Effect;

use crate::app::{AppModel, InterfaceTab, SectionId};
use crate::script;

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGrey;

/// Draw a full frame.
pub fn draw(out: &mut impl Write, model: &AppModel) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let width = width as usize;
    let mut row: u16 = 0;

    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let tint = match model.effect {
        Some(Effect::Matrix) => Some(Color::Green),
        Some(Effect::Boom) => Some(Color::Yellow),
        None => None,
    };
    if let Some(color) = tint {
        queue!(out, SetForegroundColor(color))?;
    }
    if model.flash {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }

    draw_header(out, model, width, &mut row)?;
    match model.section {
        SectionId::Overview => draw_lines(out, script::OVERVIEW_LINES.iter().copied(), width, &mut row)?,
        SectionId::Terminal => draw_terminal(out, model, width, &mut row)?,
        SectionId::Interfaces => draw_interfaces(out, model, width, &mut row)?,
        SectionId::EasterEggs => draw_console(out, model, width, &mut row)?,
    }
    draw_footer(out, model, width, height, tint)?;

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}

fn draw_header(out: &mut impl Write, model: &AppModel, width: usize, row: &mut u16) -> io::Result<()> {
    put(out, row, &fit("🔐 ENCLAVE MESSENGER", width))?;

    queue!(out, cursor::MoveTo(0, *row))?;
    for (i, section) in SectionId::ALL.into_iter().enumerate() {
        let label = format!(" {} {} ", i + 1, section.title());
        if section == model.section {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(&label),
                SetAttribute(Attribute::NoReverse)
            )?;
        } else {
            queue!(out, Print(&label))?;
        }
    }
    *row += 1;
    put(out, row, "")?;
    Ok(())
}

fn draw_lines<'a>(
    out: &mut impl Write,
    lines: impl Iterator<Item = &'a str>,
    width: usize,
    row: &mut u16,
) -> io::Result<()> {
    for line in lines {
        put(out, row, &fit(line, width))?;
    }
    Ok(())
}

fn draw_terminal(out: &mut impl Write, model: &AppModel, width: usize, row: &mut u16) -> io::Result<()> {
    for (i, line) in model.transcript.iter().enumerate() {
        let last = i + 1 == model.transcript.len();
        if last && line.starts_with("enclave>") {
            put(out, row, &fit(&format!("{line}█"), width))?;
        } else {
            put(out, row, &fit(line, width))?;
        }
    }
    Ok(())
}

fn draw_interfaces(out: &mut impl Write, model: &AppModel, width: usize, row: &mut u16) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, *row))?;
    for tab in InterfaceTab::ALL {
        let label = format!(" {} ", tab.title());
        if tab == model.interface {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(&label),
                SetAttribute(Attribute::NoReverse)
            )?;
        } else {
            queue!(out, Print(&label))?;
        }
    }
    *row += 1;
    put(out, row, "")?;

    let lines = script::INTERFACE_LINES[model.interface.index()];
    draw_lines(out, lines.iter().copied(), width, row)?;
    put(out, row, "")?;
    put(out, row, &fit("←/→ to switch interface", width))?;
    Ok(())
}

fn draw_console(out: &mut impl Write, model: &AppModel, width: usize, row: &mut u16) -> io::Result<()> {
    put(out, row, &fit("Try: /joke, /ascii, /boom, /matrix, /konami", width))?;
    put(out, row, "")?;
    put(out, row, &fit(&format!("> {}█", model.input), width))?;
    put(out, row, "")?;
    for line in model.console.lines() {
        put(out, row, &fit(line, width))?;
    }
    Ok(())
}

fn draw_footer(
    out: &mut impl Write,
    model: &AppModel,
    width: usize,
    height: u16,
    tint: Option<Color>,
) -> io::Result<()> {
    let strip_row = height.saturating_sub(2);
    queue!(out, cursor::MoveTo(0, strip_row))?;
    if let Some(banner) = model.banner {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            SetAttribute(Attribute::Bold),
            Print(fit(banner, width)),
            SetAttribute(Attribute::NormalIntensity)
        )?;
    } else {
        let progress = model.cheat_progress();
        if !progress.is_empty() {
            queue!(out, SetForegroundColor(ACCENT), Print(fit(&progress, width)))?;
        }
    }

    queue!(
        out,
        cursor::MoveTo(0, height.saturating_sub(1)),
        SetForegroundColor(DIM),
        Print(fit("Tab: sections   q: quit", width))
    )?;
    match tint {
        Some(color) => queue!(out, SetForegroundColor(color))?,
        None => queue!(out, ResetColor)?,
    }
    Ok(())
}

fn put(out: &mut impl Write, row: &mut u16, text: &str) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, *row), Print(text))?;
    *row += 1;
    Ok(())
}

/// Truncate `line` to the terminal width by display columns.
fn fit(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_owned();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        fitted.push(c);
    }
    fitted
}
