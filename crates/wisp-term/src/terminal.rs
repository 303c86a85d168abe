// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, alternate screen, and RAII cleanup.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl (TIOCGWINSZ), isatty, and
// raw fd writes have no safe alternative; they are the POSIX interfaces
// for terminal control. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state: it enters raw mode via
// termios, switches to the alternate screen, turns on pointer tracking
// and focus reporting, and guarantees restoration on drop — even when a
// panic lands mid-frame.
//
// The panic hook writes a pre-built restore sequence directly to fd 1,
// bypassing Rust's stdout lock. A panic during a frame flush would
// otherwise deadlock against that lock, leaving the user with a silent,
// echoless terminal and no error message. One raw write restores
// everything, then the original hook prints to a working screen.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Columns (width in cells).
    pub cols: u16,
    /// Rows (height in cells).
    pub rows: u16,
}

impl Size {
    /// Total cell count (`cols × rows`).
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.cols as u32 * self.rows as u32
    }
}

// ─── Terminal queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` when stdout is not a terminal or the query fails.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdin is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic-safe restore ─────────────────────────────────────────────────────

/// Global backup of the original termios for the panic hook.
///
/// The [`Terminal`] struct keeps its own copy, but the hook runs with no
/// access to it. A `Mutex<Option<..>>` (not `static mut`) carries the
/// backup across.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Everything `enter()` switched on, switched off in one write.
///
/// In order: end synchronized output, disable mouse tracking (SGR format
/// plus all three granularities), disable focus reporting, reset SGR,
/// show the cursor, and — last, so the restored shell content appears
/// clean — exit the alternate screen.
#[rustfmt::skip]
const EMERGENCY_RESTORE: &[u8] = b"\
    \x1b[?2026l\
    \x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l\
    \x1b[?1004l\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

/// Guard so the hook installs at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before the error prints.
///
/// Without it, a panic in raw mode leaves the terminal with no echo and
/// no line editing, and the message lands on the vanishing alternate
/// screen. The hook writes [`EMERGENCY_RESTORE`] straight to fd 1,
/// restores termios, then delegates to the original handler.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor,
/// bypassing the `io::stdout()` lock the panicking thread may hold.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// [`enter`](Self::enter) switches to full-screen mode: raw input, the
/// alternate screen, any-motion pointer tracking, focus reporting. The
/// terminal restores automatically when the handle drops — panics
/// included.
///
/// # Example
///
/// ```no_run
/// use wisp_term::terminal::Terminal;
///
/// let mut term = Terminal::new()?;
/// term.enter()?;
/// // ... run frames ...
/// // Restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    /// Original termios saved before raw mode.
    #[cfg(unix)]
    original_termios: Option<libc::termios>,

    /// Cached size; refresh with [`refresh_size`](Self::refresh_size).
    size: Size,

    /// Whether full-screen mode is active.
    active: bool,
}

impl Terminal {
    /// Create a handle and query the current size.
    ///
    /// Does **not** enter full-screen mode. Falls back to 80×24 when the
    /// size cannot be determined (tests, pipes).
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for platforms whose
    /// console setup can fail.
    pub fn new() -> io::Result<Self> {
        let size = get_size().unwrap_or(Size { cols: 80, rows: 24 });

        Ok(Self {
            #[cfg(unix)]
            original_termios: None,
            size,
            active: false,
        })
    }

    /// Current terminal size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the size from the OS, typically after SIGWINCH.
    /// Caches and returns the result.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            self.size = s;
        }
        self.size
    }

    /// Whether full-screen mode is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter full-screen mode.
    ///
    /// Enables raw mode, switches to the alternate screen, hides the
    /// cursor, and turns on:
    /// - SGR mouse tracking in any-motion mode (the orb needs every move)
    /// - focus reporting (the animation parks while unfocused)
    ///
    /// Idempotent while already active.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or terminal output fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();

        // Raw mode first (no-op off-tty).
        self.enable_raw_mode()?;

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::cursor_hide(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        ansi::enable_mouse(&mut lock, ansi::MouseMode::Motion)?;
        ansi::enable_focus_reporting(&mut lock)?;
        lock.flush()?;

        self.active = true;
        Ok(())
    }

    /// Leave full-screen mode and restore the terminal.
    ///
    /// Disables everything in reverse order, brings back the original
    /// screen content, and exits raw mode. Idempotent while inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal output or termios restore fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::end_sync(&mut lock)?;
        ansi::disable_focus_reporting(&mut lock)?;
        ansi::disable_mouse(&mut lock)?;
        ansi::reset(&mut lock)?;
        ansi::cursor_show(&mut lock)?;
        ansi::exit_alt_screen(&mut lock)?;
        lock.flush()?;
        drop(lock);

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    // ── Raw mode (termios) ──────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        use std::os::unix::io::AsRawFd;

        if !is_tty() {
            return Ok(());
        }

        let fd = io::stdin().as_raw_fd();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);

            // The panic hook needs its own copy.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            // cfmakeraw equivalent: no line processing, no echo, no signals.
            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;

            // VMIN=1, VTIME=0: read() blocks until a byte is available.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            use std::os::unix::io::AsRawFd;
            let fd = io::stdin().as_raw_fd();

            unsafe {
                if libc::tcsetattr(fd, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            // Restored cleanly; the hook no longer needs the backup.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }

            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
