// SPDX-License-Identifier: MIT
//
// FrameBuffer — the 2D cell grid every part of the scene paints into.
//
// The section content, the navigation bar, the theme selector overlay,
// and the orb all paint here, back to front. The diff renderer then
// compares this frame against the previous one and emits escape
// sequences only for cells that changed.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are
//     contiguous, so the renderer's left-to-right scan is linear.
//
//   - Paint operations take an optional `ClipRect`. The selector overlay
//     and scrolled sections paint freely; clipping keeps them inside
//     their region.
//
//   - Translucent backgrounds composite through `Color::resolve_over()`
//     in linear light. This is how the orb's glow halo tints the
//     backdrop underneath it instead of punching an opaque hole in it.
//
//   - Wide glyphs occupy two columns: the codepoint in the first cell,
//     a continuation cell (ch = 0) in the second. Paint methods place
//     continuations and clean up broken pairs.
//
// Memory: a 200×50 terminal is 10,000 cells × 16 bytes = 160 KB per
// buffer, two buffers for double-buffering. Not a concern.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Attr, Cell, UnderlineStyle};
use crate::color::{CellColor, Color};

// ─── ClipRect ───────────────────────────────────────────────────────────────────

/// A clipping rectangle for overflow handling.
///
/// Coordinates are signed so a scrolled section can hang partially
/// above the viewport (negative y) and still clip correctly.
///
/// # Examples
///
/// ```
/// use wisp_term::buffer::ClipRect;
///
/// let clip = ClipRect::new(10, 5, 80, 24);
/// assert!(clip.contains(10, 5));    // top-left corner: inside
/// assert!(clip.contains(89, 28));   // bottom-right corner: inside
/// assert!(!clip.contains(9, 5));    // left of bounds: outside
/// assert!(!clip.contains(90, 5));   // right of bounds: outside
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    /// Left edge (may be negative for scrolled content).
    pub x: i32,
    /// Top edge (may be negative for scrolled content).
    pub y: i32,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl ClipRect {
    /// Create a clipping rectangle with signed coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create from unsigned screen-space coordinates.
    #[inline]
    #[must_use]
    pub const fn from_unsigned(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
            width,
            height,
        }
    }

    /// Right edge (exclusive): `x + width`.
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (exclusive): `y + height`.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height as i32
    }

    /// Whether this rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a screen-space point is inside this rectangle.
    ///
    /// Screen coordinates are `u16` (terminal positions are never
    /// negative); the rect itself may start at negative x/y.
    #[inline]
    #[must_use]
    pub fn contains(self, px: u16, py: u16) -> bool {
        let px = i32::from(px);
        let py = i32::from(py);
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    ///
    /// Returns `None` if they don't overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            // Safe: both differences are positive (x2 > x1, y2 > y1) and
            // bounded by input widths/heights which are u16.
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            Some(Self {
                x: x1,
                y: y1,
                width: (x2 - x1) as u16,
                height: (y2 - y1) as u16,
            })
        } else {
            None
        }
    }
}

// ─── FrameBuffer ────────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells — the canvas the scene paints to.
///
/// Flat `Vec<Cell>` with row-major indexing: `index = y * width + x`.
///
/// # Examples
///
/// ```
/// use wisp_term::buffer::FrameBuffer;
/// use wisp_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// assert_eq!(buf.width(), 80);
/// assert_eq!(buf.height(), 24);
///
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).unwrap().character(), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a buffer filled with empty cells (space, default colors).
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    /// Create a buffer pre-filled with a background color.
    ///
    /// Takes [`CellColor`] (not [`Color`]) because there is no existing
    /// cell to composite against at creation time. If you have a
    /// `Color`, resolve it with [`Color::to_cell_color`] first.
    #[must_use]
    pub fn with_bg(width: u16, height: u16, bg: CellColor) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY.with_bg(bg); size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Buffer width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells (`width × height`).
    #[inline]
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// The full buffer bounds as a [`ClipRect`].
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    /// Whether `(x, y)` is within the buffer.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Convert `(x, y)` to a flat index.
    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// The raw cell slice (for the diff renderer's hot loop).
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// A single row as a slice. Returns `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Iterate cells with their `(x, y)` coordinates.
    #[allow(clippy::cast_possible_truncation)]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let w = usize::from(self.width).max(1); // max(1) prevents div-by-zero in dead code
        self.cells.iter().enumerate().map(move |(i, cell)| {
            // Safe truncation: x < width (u16) and y < height (u16).
            let x = (i % w) as u16;
            let y = (i / w) as u16;
            (x, y, cell)
        })
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    /// Clear the buffer to empty cells (space, default colors, no attrs).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Clear with a specific background color.
    pub fn clear_with_bg(&mut self, bg: CellColor) {
        self.cells.fill(Cell::EMPTY.with_bg(bg));
    }

    /// Resize the buffer, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    /// Copy another buffer's contents into this one, reusing this
    /// buffer's allocation when the sizes already match.
    ///
    /// The renderer uses this to store the just-rendered frame as the
    /// new comparison baseline without allocating per frame.
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.height = other.height;
        if self.cells.len() == other.cells.len() {
            self.cells.copy_from_slice(&other.cells);
        } else {
            self.cells.clear();
            self.cells.extend_from_slice(&other.cells);
        }
    }

    // ─── Direct Cell Access ──────────────────────────────────────────────

    /// Write a cell directly to the buffer.
    ///
    /// No compositing, no clipping, no wide-char cleanup. Just a
    /// bounds-checked write, for cells that are already fully resolved.
    ///
    /// Returns `true` if the position was in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    // ─── Wide Character Cleanup ──────────────────────────────────────────

    /// Break any wide character that touches position `(x, y)`.
    ///
    /// - If `(x, y)` is a continuation cell, the owner at `(x-1)` is
    ///   replaced with a space.
    /// - If the cell after `(x, y)` is a continuation, this cell was a
    ///   wide-char start — the orphaned continuation is cleared.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = u32::from(b' ');
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY;
            }
        }
    }

    // ─── Paint — with compositing ───────────────────────────────────────

    /// Paint a cell with transparency compositing and clipping.
    ///
    /// - `fg` converts to [`CellColor`] directly (terminals have no
    ///   foreground transparency).
    /// - `bg` composites over the existing cell's background via
    ///   [`Color::resolve_over`]. Opaque backgrounds skip the blend.
    ///
    /// If the target position belongs to a wide character (as either
    /// half), the pair is broken first.
    ///
    /// Returns `true` if the cell was painted (in bounds, not clipped).
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn paint_cell(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Color,
        bg: Color,
        attrs: Attr,
        underline: UnderlineStyle,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        self.break_wide_char_at(x, y);

        let idx = self.index(x, y);
        let cell_fg = fg.to_cell_color();
        let existing_bg = self.cells[idx].bg;
        let cell_bg = bg.resolve_over(&existing_bg);

        self.cells[idx] = Cell {
            ch: ch as u32,
            fg: cell_fg,
            bg: cell_bg,
            attrs,
            underline,
        };

        true
    }

    /// Fill a rectangle with a background color.
    ///
    /// Cells in the rect are reset to spaces with no attributes. A
    /// translucent `bg` composites over whatever was there instead of
    /// replacing it.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        bg: Color,
        clip: Option<&ClipRect>,
    ) {
        let rect = ClipRect::from_unsigned(x, y, width, height);
        let Some(mut effective) = rect.intersect(self.bounds()) else {
            return;
        };

        if let Some(clip) = clip {
            let Some(clipped) = effective.intersect(*clip) else {
                return;
            };
            effective = clipped;
        }

        // Safe casts: intersection with bounds (origin 0,0) guarantees
        // non-negative values bounded by buffer dimensions.
        let x1 = effective.x as u16;
        let y1 = effective.y as u16;
        let x2 = effective.right() as u16;
        let y2 = effective.bottom() as u16;

        let is_opaque = bg.is_opaque();
        let opaque_bg = if is_opaque { bg.to_cell_color() } else { CellColor::Default };

        for row in y1..y2 {
            let row_start = self.index(x1, row);
            let row_end = self.index(x2, row);
            for cell in &mut self.cells[row_start..row_end] {
                cell.ch = u32::from(b' ');
                cell.fg = CellColor::Default;
                cell.attrs = Attr::empty();
                cell.underline = UnderlineStyle::None;
                cell.bg = if is_opaque {
                    opaque_bg
                } else {
                    bg.resolve_over(&cell.bg)
                };
            }
        }
    }

    // ─── Text Painting ──────────────────────────────────────────────────

    /// Paint a text string with wide-character handling and compositing.
    ///
    /// Characters are placed left-to-right from `(x, y)`. Wide glyphs
    /// take two columns with a continuation cell at `x+1`. Zero-width
    /// characters are skipped.
    ///
    /// A wide glyph that would straddle the right edge is painted as a
    /// space instead — half a wide char is display garbage in every
    /// terminal.
    ///
    /// Returns the number of columns consumed.
    #[allow(clippy::too_many_arguments, clippy::similar_names)]
    pub fn paint_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Color,
        bg: Color,
        attrs: Attr,
        underline: UnderlineStyle,
        clip: Option<&ClipRect>,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }

        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let char_w = ch.width().unwrap_or(0);
            if char_w == 0 {
                continue;
            }

            let is_wide = char_w == 2;

            if is_wide && col + 1 >= self.width {
                self.paint_cell(col, y, ' ', fg, bg, attrs, underline, clip);
                col += 1;
                break;
            }

            if self.paint_cell(col, y, ch, fg, bg, attrs, underline, clip) && is_wide {
                let cont_x = col + 1;
                if clip.is_none_or(|c| c.contains(cont_x, y)) {
                    // Break any wide char occupying the continuation
                    // position before overwriting it.
                    self.break_wide_char_at(cont_x, y);

                    let cont_idx = self.index(cont_x, y);
                    let existing_bg = self.cells[cont_idx].bg;
                    let cont_bg = bg.resolve_over(&existing_bg);
                    let cont_fg = fg.to_cell_color();
                    self.cells[cont_idx] = Cell::continuation(cont_fg, cont_bg, attrs);
                }
            }

            // char_w is 1 or 2 — safe truncation to u16.
            #[allow(clippy::cast_possible_truncation)]
            let w = char_w as u16;
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ───────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// Returns 0 for control characters, 1 for most characters, and 2 for
/// wide characters (CJK, some emoji), per Unicode Standard Annex #11.
///
/// # Examples
///
/// ```
/// use wisp_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
///
/// # Examples
///
/// ```
/// use wisp_term::buffer::string_width;
///
/// assert_eq!(string_width("hello"), 5);
/// assert_eq!(string_width("中文"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
