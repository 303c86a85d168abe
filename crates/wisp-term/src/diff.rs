// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Repainting the whole screen at 60 Hz would be wasteful and visibly
// flickery over slow terminals. Most frames here change almost nothing —
// the orb glides a cell or two, a nav label lights up — so the renderer
// compares the freshly painted frame against the previous one and emits
// escapes only for cells that differ.
//
// Per frame:
//
//   1. The app paints into a FrameBuffer.
//   2. render() diffs it against the stored previous frame.
//   3. Changed cells go through CellWriter, which elides redundant escapes.
//   4. Everything lands in an OutputBuffer; flush() is one write() syscall.
//
// Unchanged rows are detected with a single slice comparison and skipped
// without visiting their cells. The frame is wrapped in synchronized output
// (DEC 2026) so the terminal presents it atomically. The previous frame is
// kept in a reused allocation; steady state allocates nothing.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::output::{CellWriter, OutputBuffer};

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells that differed from the previous frame and were emitted.
    pub cells_rendered: usize,
    /// Cells that matched the previous frame and were skipped.
    pub cells_skipped: usize,
    /// Bytes of ANSI output generated.
    pub bytes_written: usize,
}

impl RenderStats {
    /// All cells visited, emitted or not.
    #[inline]
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.cells_rendered + self.cells_skipped
    }
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Emits ANSI for the cells that changed since the previous frame.
///
/// Holds the previous frame for comparison and a [`CellWriter`] for escape
/// elision. Output accumulates in a buffer so each frame is a single
/// `write()`.
///
/// # Usage
///
/// ```no_run
/// use wisp_term::buffer::FrameBuffer;
/// use wisp_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
///
/// // Paint into `frame`...
///
/// let stats = renderer.render(&frame);
/// renderer.flush().unwrap();
/// ```
pub struct DiffRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// A renderer with no previous frame; the first render draws everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Diff `current` against the stored frame and stage the ANSI output.
    ///
    /// Follow with [`flush`](Self::flush) or [`flush_to`](Self::flush_to) to
    /// reach the terminal, or [`output_bytes`](Self::output_bytes) to inspect
    /// the staged bytes in tests.
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();
        self.writer.reset_state();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.store_frame(current);
            return stats;
        }

        ansi::begin_sync(&mut self.output).ok();

        // A previous frame only counts when its size matches; a resize
        // invalidates every cell anyway.
        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        if previous.is_none() {
            ansi::clear_screen(&mut self.output).ok();
            ansi::cursor_to(&mut self.output, 0, 0).ok();
        }

        for y in 0..height {
            let Some(row) = current.row(y) else { continue };
            let prev_row = previous.and_then(|prev| prev.row(y));

            // Whole-row skip on slice equality.
            if prev_row == Some(row) {
                stats.cells_skipped += row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(row) {
                if prev_row.is_none_or(|prev| prev[usize::from(x)] != *cell) {
                    self.writer.render_cell(&mut self.output, x, y, cell);
                    stats.cells_rendered += 1;
                } else {
                    stats.cells_skipped += 1;
                }
            }
        }

        // Leave the terminal in a clean state so nothing bleeds into the
        // shell prompt after exit.
        ansi::reset(&mut self.output).ok();
        ansi::end_sync(&mut self.output).ok();

        stats.bytes_written = self.output.len();

        self.store_frame(current);

        stats
    }

    /// The staged ANSI bytes from the last render.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Write the staged output to stdout and clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write the staged output to `w` and clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }

    /// Drop the previous frame so the next render repaints everything.
    ///
    /// Needed after anything that may have disturbed the real screen
    /// behind our back, such as a SIGWINCH resize.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    /// Keep `current` for the next diff, reusing the allocation when the
    /// size is unchanged.
    fn store_frame(&mut self, current: &FrameBuffer) {
        match &mut self.previous {
            Some(prev) if prev.width() == current.width() && prev.height() == current.height() => {
                prev.copy_from(current);
            }
            _ => {
                self.previous = Some(current.clone());
            }
        }
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
