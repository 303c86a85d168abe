// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions writing escape sequences to any `impl Write`. No state
// and no policy about when to emit — the `CellWriter` decides that. This
// module only knows the byte encoding of each terminal command the shell
// uses: cursor and screen control, SGR styling, synchronized output,
// the alternate screen, SGR mouse tracking, and focus reporting.
//
// Cursor positions are 0-indexed in our API and converted to the
// 1-indexed form ANSI expects.
//
// Everything returns `io::Result` propagated from the writer. Against
// an `OutputBuffer` (a Vec) these never fail.
use std::io::{self, Write};

use crate::cell::{Attr, UnderlineStyle};
use crate::color::CellColor;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` with CUP (Cursor Position).
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide the cursor (DECTCEM reset). The shell never shows a text
/// cursor; pointer feedback comes from the scene itself.
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set). Emitted on the way out so the user's
/// prompt comes back intact.
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// Clears **everything**: weight, italics, colors, underline. The
/// stateful writer must invalidate its tracked style after this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Compact SGR codes for the standard palette (30-37, 90-97), extended
/// 256-color format for indices 16-255, 24-bit `TrueColor` for RGB —
/// which is what every resolved palette color uses.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[39m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 82 + u16::from(idx))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

// ─── Background Color ────────────────────────────────────────────────────────

/// Set the background color.
///
/// Same encoding strategy as [`fg`] with BG-specific codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B).
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    match color {
        CellColor::Default => w.write_all(b"\x1b[49m"),
        CellColor::Ansi256(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 92 + u16::from(idx))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Emit SGR codes for text attributes as one CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;3m` for
/// bold + italic. Does nothing if no attributes are set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut first = true;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    w.write_all(b";")?;
                }
                w.write_all($code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, b"1");
    emit!(Attr::DIM, b"2");
    emit!(Attr::ITALIC, b"3");
    emit!(Attr::INVERSE, b"7");
    emit!(Attr::STRIKETHROUGH, b"9");
    let _ = first; // Last expansion sets first; suppress dead-write warning.

    w.write_all(b"m")
}

// ─── Underline Style ─────────────────────────────────────────────────────────

/// Set the underline style using SGR 4:N colon syntax.
///
/// Modern terminals (Kitty, `WezTerm`, Ghostty, iTerm2) support the
/// colon sub-parameter form; straight underline degrades to plain SGR 4
/// everywhere else. `None` disables via SGR 24.
pub fn underline(w: &mut impl Write, style: UnderlineStyle) -> io::Result<()> {
    match style {
        UnderlineStyle::None => w.write_all(b"\x1b[24m"),
        UnderlineStyle::Straight => w.write_all(b"\x1b[4:1m"),
        UnderlineStyle::Curly => w.write_all(b"\x1b[4:3m"),
    }
}

// ─── Synchronized Output ─────────────────────────────────────────────────────

/// Begin synchronized output (DEC Private Mode 2026).
///
/// The terminal buffers everything until [`end_sync`], so a frame that
/// repaints the orb and the section under it lands atomically instead
/// of tearing mid-update.
#[inline]
pub fn begin_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026h")
}

/// End synchronized output — the terminal renders the buffered frame.
#[inline]
pub fn end_sync(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?2026l")
}

// ─── Alternate Screen ───────────────────────────────────────────────────────

/// Enter the alternate screen buffer (DEC Private Mode 1049).
///
/// The alternate screen preserves whatever was in the terminal before
/// the shell started; leaving restores it, so visiting the site never
/// destroys scrollback.
#[inline]
pub fn enter_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049h")
}

/// Exit the alternate screen buffer and restore original content.
#[inline]
pub fn exit_alt_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1049l")
}

// ─── Mouse Protocol ─────────────────────────────────────────────────────────

/// Mouse tracking granularity for the SGR mouse protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    /// Button press and release only (DEC 1000).
    Click,
    /// Buttons plus drag motion (DEC 1000 + 1002).
    Drag,
    /// All motion, buttons held or not (DEC 1000 + 1002 + 1003).
    /// The orb follows the pointer, so this is the mode the shell runs.
    Motion,
}

/// Enable SGR mouse tracking at the given granularity.
///
/// Uses SGR format (DEC 1006), which reports coordinates beyond column
/// 223 and distinguishes press from release. Call [`disable_mouse`]
/// before changing modes to avoid stale tracking flags.
pub fn enable_mouse(w: &mut impl Write, mode: MouseMode) -> io::Result<()> {
    w.write_all(b"\x1b[?1000h")?;
    if matches!(mode, MouseMode::Drag | MouseMode::Motion) {
        w.write_all(b"\x1b[?1002h")?;
    }
    if mode == MouseMode::Motion {
        w.write_all(b"\x1b[?1003h")?;
    }
    w.write_all(b"\x1b[?1006h")
}

/// Disable all mouse tracking.
pub fn disable_mouse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1006l")?;
    w.write_all(b"\x1b[?1003l")?;
    w.write_all(b"\x1b[?1002l")?;
    w.write_all(b"\x1b[?1000l")
}

// ─── Focus Reporting ────────────────────────────────────────────────────────

/// Enable terminal focus reporting (DEC 1004).
///
/// The terminal sends `\x1b[I` on focus gain and `\x1b[O` on focus
/// loss. The shell uses this to park the orb animation while the window
/// is in the background instead of burning frames nobody sees.
#[inline]
pub fn enable_focus_reporting(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1004h")
}

/// Disable terminal focus reporting.
#[inline]
pub fn disable_focus_reporting(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?1004l")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
