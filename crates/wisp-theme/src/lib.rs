//! # wisp-theme — Appearance System
//!
//! Six stored appearance variants — light, dark, high-contrast, two
//! color-vision-safe palettes, and "follow the host" — with file
//! persistence, ambient host resolution, and synchronous change
//! notification. Everything downstream paints from a resolved variant;
//! only this crate knows how a preference becomes one.
//!
//! # Architecture
//!
//! ```text
//! variant.rs:  AppearanceVariant (stored, 6) / ResolvedVariant (concrete, 5)
//!     │
//!     ▼
//! store.rs:    ThemeStore — persistence, set/set_tag, resolve, pub/sub
//!     │              │
//!     │              ▼
//!     │        signal.rs: HostSignal trait + COLORFGBG probe
//!     ▼
//! accents.rs:  AccentSet + Scene — the five palettes, as const tables
//!     │
//!     ▼
//! contrast.rs: WCAG luminance/ratio math backing the palette tests
//! ```
//!
//! # Resolution
//!
//! A concrete variant resolves to itself. `host-preference` asks the
//! [`HostSignal`] on every resolve — no caching — so a terminal that
//! flips from dark to light mid-session is honored by the next paint.

pub mod accents;
pub mod contrast;
pub mod signal;
pub mod store;
pub mod variant;

pub use accents::{AccentSet, Scene, accents, scene};
pub use signal::{Brightness, ColorFgBg, HostSignal};
pub use store::{SubscriberId, ThemeStore};
pub use variant::{AppearanceVariant, ResolvedVariant};
