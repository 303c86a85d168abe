// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the heartbeat of the shell.
//
// Everything meets here: stdin bytes flow in from the background reader,
// get parsed into events, the application handles them, paints a frame
// buffer, and the diff renderer emits only what changed. One loop.
//
// # The 60fps hybrid model
//
// The loop blocks on the stdin channel until the next frame deadline
// (16.7ms apart). Three behaviors fall out of one call:
//
//   1. **Instant response**: input bytes wake the loop immediately; no
//      polling latency between a keypress and its frame.
//
//   2. **Zero idle cost**: with nothing happening, `recv_timeout` parks
//      the thread and the OS schedules us out.
//
//   3. **Steady animation**: the deadline fires 60 times a second whether
//      or not input is streaming. This matters more here than it first
//      looks: the orb animates hardest precisely while pointer motion is
//      flooding the channel, so the tick is scheduled against a fixed
//      deadline instead of restarting on every received chunk. Rendering
//      still only happens when something marked the frame dirty.
//
// # SIGWINCH
//
// Resize is detected by a signal handler that sets an `AtomicBool`; the
// loop checks it each iteration, resizes the frame, and forces a full
// redraw. Worst-case latency from resize to repaint is one tick.
//
// # Escape sequence timeout
//
// A lone ESC byte could be the Escape key or a sequence opener, so the
// parser holds it back. When a deadline passes with no new bytes, pending
// input is flushed as literal keys — Escape resolves within one tick.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler, checked each loop iteration.
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install the SIGWINCH (terminal resize) handler.
///
/// The handler only sets the flag; storing to an atomic is one of the
/// few things a signal handler may legally do.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App trait ───────────────────────────────────────────────────────────────

/// What the application tells the loop after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Exit the event loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// The loop calls these in order each iteration:
///
/// 1. [`on_event`](App::on_event) — per parsed input event
/// 2. [`on_resize`](App::on_resize) — when the terminal size changed
/// 3. [`on_tick`](App::on_tick) — when a frame deadline passes
/// 4. [`paint`](App::paint) — when the frame is dirty
/// 5. [`cursor`](App::cursor) — after paint, to place the hardware cursor
///
/// Only [`paint`](App::paint) is required.
pub trait App {
    /// Handle one input event (key, mouse, focus).
    ///
    /// Return [`Action::Quit`] to leave the loop.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// Handle a terminal resize. The frame buffer has already been
    /// resized when this runs.
    fn on_resize(&mut self, _size: Size) {}

    /// Advance time-based state. Runs once per frame deadline, input or
    /// not. Return `true` when something changed and a repaint is due.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the application into the frame buffer.
    ///
    /// Runs only when the frame is dirty; the buffer arrives cleared.
    fn paint(&mut self, buf: &mut FrameBuffer);

    /// Where to show the hardware cursor after painting, or `None` to
    /// keep it hidden. A full-screen shell usually hides it and draws
    /// its own focus indicators.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Loop config ─────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Interval between frame deadlines, in microseconds.
    ///
    /// Also bounds how long a pending lone ESC can sit before it
    /// resolves as a real Escape key. Default: 16 667µs (60 Hz) — the
    /// orb's smoothing factor is tuned against this rate.
    pub tick_interval_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_us: 16_667, // 60 Hz
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// Owns the terminal, parser, renderer, and stdin reader. [`run`](Self::run)
/// blocks until the application returns [`Action::Quit`].
///
/// # Example
///
/// ```no_run
/// use wisp_term::event_loop::{Action, App, EventLoop};
/// use wisp_term::buffer::FrameBuffer;
/// use wisp_term::input::{Event, KeyCode, KeyEvent};
///
/// struct MyApp;
///
/// impl App for MyApp {
///     fn on_event(&mut self, event: &Event) -> Action {
///         if let Event::Key(KeyEvent { code: KeyCode::Char('q'), .. }) = event {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self, buf: &mut FrameBuffer) {
///         // Paint your UI here...
///     }
/// }
///
/// let mut event_loop = EventLoop::new()?;
/// event_loop.run(&mut MyApp)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

impl EventLoop {
    /// An event loop with default timing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// An event loop with custom timing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        })
    }

    /// Current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the application returns [`Action::Quit`].
    ///
    /// Enters full-screen mode, installs the SIGWINCH handler, spawns
    /// the stdin reader, runs the hybrid loop, and restores the terminal
    /// afterwards — also when the loop errored.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal enter/leave or rendering fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let (mut reader, rx) = StdinReader::spawn();

        let result = self.run_inner(app, &rx);

        reader.stop();
        self.terminal.leave()?;

        result
    }

    /// The loop body, separated so cleanup in [`run`] always happens.
    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        let mut dirty = true; // First frame always renders.
        let tick = Duration::from_micros(self.config.tick_interval_us);
        let mut next_tick = Instant::now() + tick;

        loop {
            // ── Receive stdin bytes until the frame deadline ─────
            let wait = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(wait) {
                Ok(bytes) => {
                    let events = self.parser.advance(&bytes);
                    for event in &events {
                        if app.on_event(event) == Action::Quit {
                            return Ok(());
                        }
                    }
                    if !events.is_empty() {
                        dirty = true;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Deadline reached with no new bytes: resolve any
                    // pending lone ESC as a literal keypress.
                    if self.parser.has_pending() {
                        let events = self.parser.flush();
                        for event in &events {
                            if app.on_event(event) == Action::Quit {
                                return Ok(());
                            }
                        }
                        if !events.is_empty() {
                            dirty = true;
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    // Reader thread is gone; exit cleanly.
                    return Ok(());
                }
            }

            // ── Terminal resize ──────────────────────────────────
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }

            // ── Tick when the deadline passes ────────────────────
            let now = Instant::now();
            if now >= next_tick {
                if app.on_tick() {
                    dirty = true;
                }
                next_tick += tick;
                if next_tick <= now {
                    // Fell behind (slow paint, suspended process):
                    // realign instead of firing catch-up ticks.
                    next_tick = now + tick;
                }
            }

            // ── Render if dirty ──────────────────────────────────
            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;

                let stdout = io::stdout();
                let mut lock = stdout.lock();
                if let Some((x, y)) = app.cursor() {
                    ansi::cursor_to(&mut lock, x, y)?;
                    ansi::cursor_show(&mut lock)?;
                } else {
                    ansi::cursor_hide(&mut lock)?;
                }
                lock.flush()?;

                dirty = false;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
