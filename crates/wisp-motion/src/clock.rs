// SPDX-License-Identifier: MIT

//! The frame clock seam.
//!
//! The animator never owns a timer. Whoever drives it — the event loop's
//! tick phase in the binary, a manual clock in tests — hands it a
//! [`FrameClock`] to schedule against. That keeps cancellation a real,
//! observable operation instead of a flag the loop might or might not
//! read: `stop` revokes a concrete tick id and the clock can say whether
//! it did.

/// Identity of one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

/// Something that can schedule a future tick and revoke one.
pub trait FrameClock {
    /// Schedule one tick. Ids are never reused within a clock.
    fn schedule(&mut self) -> TickId;

    /// Revoke a scheduled tick before it fires. Returns whether the id
    /// was actually pending — a tick that already fired is not.
    fn cancel(&mut self, id: TickId) -> bool;
}

/// A clock driven by hand. Records what is pending and what got
/// cancelled, so teardown behavior is assertable rather than assumed.
#[derive(Debug, Default)]
pub struct ManualClock {
    next: u64,
    pending: Vec<TickId>,
    cancelled: Vec<TickId>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the oldest pending tick, the way a real timer would.
    /// Returns the fired id, or `None` when nothing is scheduled.
    pub fn fire(&mut self) -> Option<TickId> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Ticks scheduled but neither fired nor cancelled.
    #[must_use]
    pub fn pending(&self) -> &[TickId] {
        &self.pending
    }

    /// Every tick revoked through [`cancel`](FrameClock::cancel).
    #[must_use]
    pub fn cancelled(&self) -> &[TickId] {
        &self.cancelled
    }
}

impl FrameClock for ManualClock {
    fn schedule(&mut self) -> TickId {
        let id = TickId(self.next);
        self.next += 1;
        self.pending.push(id);
        id
    }

    fn cancel(&mut self, id: TickId) -> bool {
        let Some(at) = self.pending.iter().position(|&p| p == id) else {
            return false;
        };
        self.pending.remove(at);
        self.cancelled.push(id);
        true
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
