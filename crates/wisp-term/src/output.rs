// SPDX-License-Identifier: MIT
//
// Frame output staging and redundant-escape elision.
//
// Every frame funnels through two layers before touching the terminal:
//
//   OutputBuffer — collects the whole frame's ANSI bytes in memory so one
//   write() syscall carries everything. Hundreds of tiny writes per frame
//   would flicker and stall; one large write does neither.
//
//   CellWriter — remembers what the terminal already holds (cursor position,
//   colors, attributes, underline) and emits only the escapes that change
//   something. A run of cells sharing a style costs one SGR, not one per cell.

use std::io::{self, Write};

use crate::ansi;
use crate::cell::{Attr, Cell, UnderlineStyle};
use crate::color::CellColor;

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// In-memory staging area for one frame's worth of ANSI bytes.
///
/// Starts at 16 KB so a typical full repaint fits without reallocating.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const INITIAL_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// An empty buffer with the initial 16 KB capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Bytes staged so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing is staged.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The staged bytes, for inspection in tests.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Encode a codepoint as UTF-8.
    ///
    /// Zero is the continuation marker and must never reach the terminal;
    /// it and any unencodable value degrade to `?`.
    pub fn write_codepoint(&mut self, cp: u32) {
        let ch = char::from_u32(cp).filter(|&c| c != '\0').unwrap_or('?');
        let mut enc = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    /// Drop staged bytes, keeping the allocation for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write everything staged to stdout in one call, then clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&self.buf)?;
            stdout.flush()?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Write everything staged to `w` in one call, then clear.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Staging buffer; the real flush is flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// Tracks the style and cursor state the terminal currently holds so each
/// cell emits only the escapes that differ.
///
/// Elision rules:
///
/// - **Cursor** — skipped when the cell lands at `(x + 1, y)` of the previous
///   one; character output already advanced the real cursor there.
/// - **Attributes** — a change emits SGR 0 first (unless nothing was set),
///   which also wipes color and underline tracking so those re-emit.
/// - **Colors** — emitted only when they differ from the tracked value.
/// - **Underline** — tracked on its own; curly vs. straight is not an `Attr`.
/// - **Continuations** — the second column of a wide glyph is skipped when
///   the first column was just written; the glyph already covered it.
pub struct CellWriter {
    cursor_x: i32,
    cursor_y: i32,
    fg: Option<CellColor>,
    bg: Option<CellColor>,
    attrs: Attr,
    underline: UnderlineStyle,
}

impl CellWriter {
    /// A writer that assumes nothing about the terminal's state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor_x: -1,
            cursor_y: -1,
            fg: None,
            bg: None,
            attrs: Attr::empty(),
            underline: UnderlineStyle::None,
        }
    }

    /// Forget all tracked state. Required after a reset or screen clear.
    #[allow(clippy::missing_const_for_fn)] // *self = Self::new() isn't const-evaluable.
    pub fn reset_state(&mut self) {
        *self = Self::new();
    }

    /// Emit one cell, eliding every escape the terminal doesn't need.
    pub fn render_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        let xi = i32::from(x);
        let yi = i32::from(y);

        if yi != self.cursor_y || xi != self.cursor_x + 1 {
            ansi::cursor_to(out, x, y).ok();
        }

        if cell.is_continuation() {
            // Shadow column of a wide glyph. If its owner was the previous
            // cell the terminal already drew here; otherwise fill with a
            // space so the background still lands.
            if xi > 0 && self.cursor_x == xi - 1 && self.cursor_y == yi {
                self.cursor_x = xi;
                return;
            }
            self.sync_style(out, cell);
            out.buf.push(b' ');
            self.cursor_x = xi;
            self.cursor_y = yi;
            return;
        }

        self.sync_style(out, cell);
        out.write_codepoint(cell.ch);

        self.cursor_x = xi;
        self.cursor_y = yi;
    }

    /// Bring the terminal's attrs, underline, and colors in line with `cell`.
    fn sync_style(&mut self, out: &mut OutputBuffer, cell: &Cell) {
        if cell.attrs != self.attrs {
            if !self.attrs.is_empty() {
                // SGR 0 clears everything, so colors and underline must
                // re-emit afterwards.
                ansi::reset(out).ok();
                self.fg = None;
                self.bg = None;
                self.underline = UnderlineStyle::None;
            }
            self.attrs = cell.attrs;
            if !cell.attrs.is_empty() {
                ansi::attrs(out, cell.attrs).ok();
            }
        }

        if cell.underline != self.underline {
            ansi::underline(out, cell.underline).ok();
            self.underline = cell.underline;
        }

        if self.fg != Some(cell.fg) {
            ansi::fg(out, cell.fg).ok();
            self.fg = Some(cell.fg);
        }

        if self.bg != Some(cell.bg) {
            ansi::bg(out, cell.bg).ok();
            self.bg = Some(cell.bg);
        }
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── OutputBuffer ────────────────────────────────────────────────────

    #[test]
    fn new_buffer_is_empty() {
        let buf = OutputBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn write_trait_appends() {
        let mut buf = OutputBuffer::new();
        write!(buf, "hello {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
    }

    #[test]
    fn codepoint_ascii() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(u32::from('A'));
        assert_eq!(buf.as_bytes(), b"A");
    }

    #[test]
    fn codepoint_multibyte() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(u32::from('中'));
        assert_eq!(buf.as_bytes(), "中".as_bytes());
    }

    #[test]
    fn codepoint_zero_degrades() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(0);
        assert_eq!(buf.as_bytes(), b"?");
    }

    #[test]
    fn codepoint_surrogate_degrades() {
        let mut buf = OutputBuffer::new();
        buf.write_codepoint(0xD800);
        assert_eq!(buf.as_bytes(), b"?");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = OutputBuffer::new();
        write!(buf, "some data").unwrap();
        let cap = buf.buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.buf.capacity(), cap);
    }

    #[test]
    fn flush_to_drains() {
        let mut buf = OutputBuffer::new();
        write!(buf, "frame data").unwrap();

        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();

        assert_eq!(dest, b"frame data");
        assert!(buf.is_empty());
    }

    #[test]
    fn flush_to_empty_is_noop() {
        let mut buf = OutputBuffer::new();
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert!(dest.is_empty());
    }

    // ── CellWriter — helpers ────────────────────────────────────────────

    fn render_one(x: u16, y: u16, cell: &Cell) -> String {
        render_seq(std::slice::from_ref(&(x, y, *cell)))
    }

    fn render_seq(cells: &[(u16, u16, Cell)]) -> String {
        let mut out = OutputBuffer::new();
        let mut writer = CellWriter::new();
        for &(x, y, ref cell) in cells {
            writer.render_cell(&mut out, x, y, cell);
        }
        String::from_utf8(out.as_bytes().to_vec()).unwrap()
    }

    // ── CellWriter — cursor ─────────────────────────────────────────────

    #[test]
    fn first_cell_positions_cursor() {
        let output = render_one(5, 3, &Cell::new('A'));
        assert!(output.contains("\x1b[4;6H"));
        assert!(output.contains('A'));
    }

    #[test]
    fn run_of_cells_moves_cursor_once() {
        let output = render_seq(&[
            (0, 0, Cell::new('A')),
            (1, 0, Cell::new('B')),
            (2, 0, Cell::new('C')),
        ]);
        // cursor-to ends in 'H'; A/B/C can't be confused with it.
        assert_eq!(output.matches('H').count(), 1);
        assert!(output.contains("ABC"));
    }

    #[test]
    fn gap_forces_cursor_move() {
        let output = render_seq(&[(0, 0, Cell::new('A')), (5, 0, Cell::new('B'))]);
        assert_eq!(output.matches('H').count(), 2);
    }

    #[test]
    fn row_change_forces_cursor_move() {
        let output = render_seq(&[(0, 0, Cell::new('A')), (0, 1, Cell::new('B'))]);
        assert_eq!(output.matches('H').count(), 2);
    }

    // ── CellWriter — colors ─────────────────────────────────────────────

    #[test]
    fn repeated_fg_emitted_once() {
        let red = CellColor::Rgb(255, 0, 0);
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_fg(red)),
            (1, 0, Cell::new('B').with_fg(red)),
        ]);
        assert_eq!(output.matches("\x1b[38;2;255;0;0m").count(), 1);
    }

    #[test]
    fn changed_fg_emitted() {
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_fg(CellColor::Rgb(255, 0, 0))),
            (1, 0, Cell::new('B').with_fg(CellColor::Rgb(0, 255, 0))),
        ]);
        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains("\x1b[38;2;0;255;0m"));
    }

    #[test]
    fn repeated_bg_emitted_once() {
        let blue = CellColor::Rgb(0, 0, 255);
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_bg(blue)),
            (1, 0, Cell::new('B').with_bg(blue)),
        ]);
        assert_eq!(output.matches("\x1b[48;2;0;0;255m").count(), 1);
    }

    #[test]
    fn first_cell_pins_default_fg() {
        // fg starts untracked, so even Default must be emitted once.
        let output = render_one(0, 0, &Cell::new('A'));
        assert!(output.contains("\x1b[39m"));
    }

    // ── CellWriter — attributes ─────────────────────────────────────────

    #[test]
    fn attrs_emitted_when_set() {
        let output = render_one(0, 0, &Cell::new('A').with_attrs(Attr::BOLD));
        assert!(output.contains("\x1b[1m"));
    }

    #[test]
    fn attr_change_resets_first() {
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_attrs(Attr::BOLD)),
            (1, 0, Cell::new('B').with_attrs(Attr::ITALIC)),
        ]);
        assert!(output.contains("\x1b[0m"));
        assert!(output.contains("\x1b[3m"));
    }

    #[test]
    fn dropping_attrs_resets() {
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_attrs(Attr::BOLD)),
            (1, 0, Cell::new('B')),
        ]);
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn gaining_attrs_skips_reset() {
        let output = render_seq(&[
            (0, 0, Cell::new('A')),
            (1, 0, Cell::new('B').with_attrs(Attr::BOLD)),
        ]);
        assert!(!output.contains("\x1b[0m"));
        assert!(output.contains("\x1b[1m"));
    }

    #[test]
    fn reset_invalidates_color_tracking() {
        let red = CellColor::Rgb(255, 0, 0);
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_fg(red).with_attrs(Attr::BOLD)),
            (1, 0, Cell::new('B').with_fg(red).with_attrs(Attr::ITALIC)),
        ]);
        // SGR 0 wiped the fg, so the same red emits twice.
        assert_eq!(output.matches("\x1b[38;2;255;0;0m").count(), 2);
    }

    // ── CellWriter — underline ──────────────────────────────────────────

    #[test]
    fn underline_emitted_when_set() {
        let output = render_one(0, 0, &Cell::new('A').with_underline(UnderlineStyle::Curly));
        assert!(output.contains("\x1b[4:3m"));
    }

    #[test]
    fn underline_change_emitted() {
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_underline(UnderlineStyle::Straight)),
            (1, 0, Cell::new('B').with_underline(UnderlineStyle::Curly)),
        ]);
        assert!(output.contains("\x1b[4:1m"));
        assert!(output.contains("\x1b[4:3m"));
    }

    #[test]
    fn repeated_underline_emitted_once() {
        let output = render_seq(&[
            (0, 0, Cell::new('A').with_underline(UnderlineStyle::Curly)),
            (1, 0, Cell::new('B').with_underline(UnderlineStyle::Curly)),
        ]);
        assert_eq!(output.matches("\x1b[4:3m").count(), 1);
    }

    // ── CellWriter — wide glyphs ────────────────────────────────────────

    #[test]
    fn continuation_after_owner_is_silent() {
        let wide = Cell::new('中');
        let cont = Cell::continuation(CellColor::Default, CellColor::Default, Attr::empty());

        let output = render_seq(&[(3, 0, wide), (4, 0, cont)]);

        assert!(output.contains('中'));
        // Nothing after the glyph — no space, no escapes.
        let last_m = output.rfind('m').unwrap();
        assert_eq!(&output[last_m + 1..], "中");
    }

    #[test]
    fn orphan_continuation_paints_space() {
        let cont = Cell::continuation(CellColor::Default, CellColor::Rgb(0, 0, 255), Attr::empty());

        let output = render_one(4, 0, &cont);

        assert!(output.contains("\x1b[1;5H"));
        assert!(output.ends_with(' '));
    }
}
