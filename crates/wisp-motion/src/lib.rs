//! # wisp-motion — Pointer Tracking & the Chasing Orb
//!
//! The decorative gradient orb that follows the pointer around the
//! page: one coordinate cell, one two-state animator, and a clock seam
//! that makes the whole thing drivable by hand in tests.
//!
//! # Architecture
//!
//! ```text
//! pointer.rs:  PointerTracker — latest sample, last write wins, pub/sub
//!     │
//!     ▼ read fresh each tick
//! orb.rs:      OrbAnimator — Idle/Running, orb += (pointer - orb) * α
//!     │
//!     ▼ schedule / cancel
//! clock.rs:    FrameClock trait + ManualClock
//! ```
//!
//! # Cancellation
//!
//! The animator reschedules itself through the clock after every step;
//! stopping revokes the concrete pending tick and reports whether it
//! did. Teardown is therefore assertable: a manual clock can show the
//! tick was cancelled rather than quietly dropped.

pub mod clock;
pub mod orb;
pub mod pointer;

pub use clock::{FrameClock, ManualClock, TickId};
pub use glam::Vec2;
pub use orb::{OrbAnimator, SMOOTHING};
pub use pointer::{PointerTracker, SubscriptionId};
