// SPDX-License-Identifier: MIT

//! The pointer tracker: one coordinate, last write wins.
//!
//! The input stream pushes samples at whatever rate the terminal reports
//! motion; nothing here retains history. Consumers either read
//! [`position`](PointerTracker::position) when they need the latest
//! sample (the orb does this every tick) or subscribe for synchronous
//! notification on every push.

use glam::Vec2;

/// Handle returned by [`PointerTracker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(Vec2)>;

/// Latest pointer coordinate plus its subscriber list.
///
/// Until the first real sample arrives the coordinate is the zero
/// vector; the orb converges toward the origin like toward any other
/// target, so a pointer that never moves is not a special case.
#[derive(Default)]
pub struct PointerTracker {
    position: Vec2,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest sample. Reads go straight to the stored coordinate;
    /// there is no snapshotting layer to go stale behind.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Store a new sample and notify subscribers, in subscription order,
    /// before returning.
    pub fn push(&mut self, position: Vec2) {
        self.position = position;
        for (_, callback) in &mut self.subscribers {
            callback(position);
        }
    }

    /// Register a callback for every future push.
    pub fn subscribe(&mut self, callback: impl FnMut(Vec2) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Removal is immediate: a push issued right
    /// after this returns, even within the same frame, will not reach
    /// the callback. Returns whether the id was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

impl std::fmt::Debug for PointerTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerTracker")
            .field("position", &self.position)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
