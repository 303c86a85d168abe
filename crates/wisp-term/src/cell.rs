// SPDX-License-Identifier: MIT
//
// Cell — one terminal column, 16 bytes, compared millions of times a second.
//
// The frame diff walks two buffers cell by cell, so this struct is sized
// and laid out for cheap equality: a u32 codepoint, two 4-byte resolved
// colors, one attribute byte, one underline byte. No heap, no alpha, no
// styling the shell never uses.
//
// Wide glyphs occupy one real cell followed by continuation cells
// (codepoint 0). Painting writes them, the diff treats them like any
// other cell, and the writer knows to skip them after emitting the wide
// glyph that covers them.

use bitflags::bitflags;

use crate::color::CellColor;

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags! {
    /// Text attributes; one byte, SGR-mappable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const INVERSE       = 1 << 3;
        const STRIKETHROUGH = 1 << 4;
    }
}

// ─── Underline ───────────────────────────────────────────────────────────────

/// Underline style, kept out of [`Attr`] because styled underlines
/// (`CSI 4:n m`) need their own SGR parameter, not just a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum UnderlineStyle {
    #[default]
    None = 0,
    Straight = 1,
    Curly = 2,
}

impl UnderlineStyle {
    /// Whether any underline is drawn.
    #[inline]
    #[must_use]
    pub const fn is_underlined(self) -> bool {
        !matches!(self, Self::None)
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// Codepoint marking the trailing columns of a wide glyph.
pub const CONTINUATION: u32 = 0;

/// A single terminal cell: codepoint plus resolved style.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The codepoint to draw, or [`CONTINUATION`] for the shadow of a
    /// wide glyph to the left.
    pub ch: u32,
    /// Resolved foreground.
    pub fg: CellColor,
    /// Resolved background.
    pub bg: CellColor,
    /// Attribute flags.
    pub attrs: Attr,
    /// Underline style.
    pub underline: UnderlineStyle,
}

impl Cell {
    /// A space in the terminal's default colors — what a cleared
    /// buffer is full of.
    pub const EMPTY: Self = Self::new(' ');

    // ─── Construction ────────────────────────────────────────────────────

    /// A cell holding `ch` in default colors with no attributes.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self {
            ch: ch as u32,
            fg: CellColor::Default,
            bg: CellColor::Default,
            attrs: Attr::empty(),
            underline: UnderlineStyle::None,
        }
    }

    /// A cell holding `ch` with explicit colors.
    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor) -> Self {
        Self {
            ch: ch as u32,
            fg,
            bg,
            attrs: Attr::empty(),
            underline: UnderlineStyle::None,
        }
    }

    /// A continuation cell shadowing a wide glyph. Carries the owner's
    /// style so the pair stays consistent under partial repaints.
    #[inline]
    #[must_use]
    pub const fn continuation(fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self {
            ch: CONTINUATION,
            fg,
            bg,
            attrs,
            underline: UnderlineStyle::None,
        }
    }

    // ─── Builders ────────────────────────────────────────────────────────

    /// This cell with a different foreground.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: CellColor) -> Self {
        self.fg = fg;
        self
    }

    /// This cell with a different background.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: CellColor) -> Self {
        self.bg = bg;
        self
    }

    /// This cell with different attributes.
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// This cell with a different underline style.
    #[inline]
    #[must_use]
    pub const fn with_underline(mut self, underline: UnderlineStyle) -> Self {
        self.underline = underline;
        self
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this cell is the shadow of a wide glyph.
    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }

    /// Whether this cell draws nothing visible over the default
    /// background: a plain unstyled space.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ch == ' ' as u32
            && self.bg.is_default()
            && self.attrs.is_empty()
            && !self.underline.is_underlined()
    }

    /// The codepoint as a `char`, or `None` for continuation cells and
    /// invalid scalar values.
    #[inline]
    #[must_use]
    pub fn character(&self) -> Option<char> {
        if self.is_continuation() {
            None
        } else {
            char::from_u32(self.ch)
        }
    }

    /// Whether two cells share every style field (everything but the
    /// codepoint) — what the output writer checks before deciding it
    /// can keep the current SGR state.
    #[inline]
    #[must_use]
    pub fn same_style(&self, other: &Self) -> bool {
        self.fg == other.fg
            && self.bg == other.bg
            && self.attrs == other.attrs
            && self.underline == other.underline
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            write!(f, "Cell(cont, bg={:?})", self.bg)
        } else {
            write!(
                f,
                "Cell({:?}, fg={:?}, bg={:?}, attrs={:?}, ul={:?})",
                self.character().unwrap_or('\u{fffd}'),
                self.fg,
                self.bg,
                self.attrs,
                self.underline
            )
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Layout ───────────────────────────────────────────────────────────

    #[test]
    fn cell_is_16_bytes() {
        assert_eq!(std::mem::size_of::<Cell>(), 16);
    }

    #[test]
    fn attr_is_1_byte() {
        assert_eq!(std::mem::size_of::<Attr>(), 1);
        assert_eq!(std::mem::size_of::<UnderlineStyle>(), 1);
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn empty_is_unstyled_space() {
        assert_eq!(Cell::EMPTY.character(), Some(' '));
        assert!(Cell::EMPTY.is_empty());
        assert!(Cell::EMPTY.fg.is_default());
        assert!(Cell::EMPTY.bg.is_default());
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn styled_carries_colors() {
        let c = Cell::styled('x', CellColor::Rgb(1, 2, 3), CellColor::Ansi256(7));
        assert_eq!(c.fg, CellColor::Rgb(1, 2, 3));
        assert_eq!(c.bg, CellColor::Ansi256(7));
        assert_eq!(c.character(), Some('x'));
    }

    #[test]
    fn continuation_has_no_character() {
        let c = Cell::continuation(CellColor::Default, CellColor::Rgb(9, 9, 9), Attr::BOLD);
        assert!(c.is_continuation());
        assert_eq!(c.character(), None);
        assert_eq!(c.bg, CellColor::Rgb(9, 9, 9));
        assert!(c.attrs.contains(Attr::BOLD));
    }

    // ── Builders ─────────────────────────────────────────────────────────

    #[test]
    fn builders_chain() {
        let c = Cell::new('a')
            .with_fg(CellColor::Rgb(255, 0, 0))
            .with_bg(CellColor::Rgb(0, 0, 255))
            .with_attrs(Attr::BOLD | Attr::ITALIC)
            .with_underline(UnderlineStyle::Curly);
        assert_eq!(c.fg, CellColor::Rgb(255, 0, 0));
        assert_eq!(c.bg, CellColor::Rgb(0, 0, 255));
        assert!(c.attrs.contains(Attr::BOLD));
        assert!(c.attrs.contains(Attr::ITALIC));
        assert_eq!(c.underline, UnderlineStyle::Curly);
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[test]
    fn styled_space_is_not_empty() {
        let c = Cell::new(' ').with_bg(CellColor::Rgb(0, 0, 0));
        assert!(!c.is_empty());
    }

    #[test]
    fn underlined_space_is_not_empty() {
        let c = Cell::new(' ').with_underline(UnderlineStyle::Straight);
        assert!(!c.is_empty());
    }

    #[test]
    fn same_style_ignores_codepoint() {
        let a = Cell::new('a').with_attrs(Attr::BOLD);
        let b = Cell::new('b').with_attrs(Attr::BOLD);
        assert!(a.same_style(&b));
    }

    #[test]
    fn same_style_sees_underline() {
        let a = Cell::new('a');
        let b = Cell::new('a').with_underline(UnderlineStyle::Straight);
        assert!(!a.same_style(&b));
    }

    #[test]
    fn underline_style_flags() {
        assert!(!UnderlineStyle::None.is_underlined());
        assert!(UnderlineStyle::Straight.is_underlined());
        assert!(UnderlineStyle::Curly.is_underlined());
    }

    #[test]
    fn wide_codepoint_survives() {
        let c = Cell::new('界');
        assert_eq!(c.character(), Some('界'));
        assert!(!c.is_continuation());
    }
}
