// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background stdin reader.
//
// A dedicated thread blocks on stdin and forwards raw byte chunks over a
// standard channel. The main thread stays free to run the frame clock:
// it receives chunks with `recv_timeout()` and keeps rendering even while
// no input arrives.
//
// Shutdown uses `poll()` with a short timeout on stdin's descriptor and
// an `AtomicBool` checked between polls, so the thread never sits in a
// blocking `read()` it can't be pulled out of.

#[cfg(unix)]
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Byte chunk read from stdin.
///
/// A keypress is 1-6 bytes, but pointer motion arrives in bursts — a
/// sweep across the window can queue hundreds of ~15-byte SGR reports
/// between reads. 4 KB absorbs a full sweep in one chunk.
const READ_BUF_SIZE: usize = 4096;

/// How often the reader thread re-checks the stop flag (milliseconds).
/// This bounds shutdown latency; 50ms is imperceptible.
const POLL_TIMEOUT_MS: i32 = 50;

/// Background stdin reader thread.
///
/// Spawns a thread that reads raw bytes from stdin and sends them through
/// a channel. The thread runs until [`stop`](Self::stop) is called or the
/// reader is dropped.
///
/// # Example
///
/// ```no_run
/// use wisp_term::reader::StdinReader;
///
/// let (reader, rx) = StdinReader::spawn();
///
/// while let Ok(bytes) = rx.recv() {
///     println!("got {} bytes", bytes.len());
/// }
/// // Reader stops when dropped.
/// ```
pub struct StdinReader {
    /// Thread handle; `None` once `stop()` has joined it.
    handle: Option<JoinHandle<()>>,
    /// Shared exit signal for the thread.
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Spawn the background reader thread.
    ///
    /// Returns the reader handle and the receiving end of the byte
    /// channel. Each received `Vec<u8>` is a non-empty chunk of raw
    /// stdin data. The channel closes when the reader stops or stdin
    /// hits EOF.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a thread.
    #[must_use]
    pub fn spawn() -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("wisp-stdin".into())
            .spawn(move || {
                Self::reader_loop(&tx, &stop_flag);
            })
            .expect("failed to spawn stdin reader thread");

        (
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        )
    }

    /// Signal the reader thread to stop and wait for it to exit.
    ///
    /// Idempotent: a second call after the thread has exited is a no-op.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Thread body: poll stdin with a timeout, forward whatever arrives,
    /// exit on the stop flag, EOF, or a disconnected channel.
    #[cfg(unix)]
    fn reader_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
        use std::os::unix::io::AsRawFd;

        let stdin_fd = io::stdin().as_raw_fd();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let ready = unsafe {
                let mut pfd = libc::pollfd {
                    fd: stdin_fd,
                    events: libc::POLLIN,
                    revents: 0,
                };
                libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
            };

            // Timeout or error: loop back to check the stop flag.
            if ready <= 0 {
                continue;
            }

            let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };

            if n <= 0 {
                // EOF or read error.
                break;
            }

            #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
            let chunk = buf[..n as usize].to_vec();

            if tx.send(chunk).is_err() {
                // Receiver dropped; nobody is listening.
                break;
            }
        }
    }

    /// Non-unix fallback with plain blocking reads. Shutdown is less
    /// graceful (the thread may sit in `read()`), but it works.
    #[cfg(not(unix))]
    fn reader_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
        use std::io::Read;

        let stdin = std::io::stdin();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            match stdin.lock().read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
