// SPDX-License-Identifier: MIT

//! The appearance store: one stored preference, resolution against the
//! host, persistence, and change notification.
//!
//! Persistence is a single-line tag file. Loading never errors — a
//! missing, unreadable, or corrupted file all read as `host-preference`.
//! Writing is best-effort: a read-only config dir must not take the
//! theme switch down with it.
//!
//! Subscribers are plain boxed closures, notified synchronously and in
//! subscription order with the freshly resolved variant. No interior
//! mutability, no channels — callers hand the store `&mut self` to
//! change it, so the borrow checker already serializes notification.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::signal::{Brightness, ColorFgBg, HostSignal};
use crate::variant::{AppearanceVariant, ResolvedVariant};

/// Handle returned by [`ThemeStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(ResolvedVariant)>;

/// The stored appearance preference plus everything needed to act on it.
pub struct ThemeStore {
    path: PathBuf,
    signal: Box<dyn HostSignal>,
    variant: AppearanceVariant,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl ThemeStore {
    /// Open a store backed by `path`, loading whatever preference is
    /// persisted there. Never fails: anything short of a well-formed tag
    /// file reads as `host-preference`.
    pub fn open(path: impl Into<PathBuf>, signal: Box<dyn HostSignal>) -> Self {
        let path = path.into();
        let variant = load_variant(&path);
        Self {
            path,
            signal,
            variant,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Open the store at the conventional location,
    /// `<config dir>/wisp/appearance`, probing the host via `COLORFGBG`.
    #[must_use]
    pub fn at_default_path() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wisp")
            .join("appearance");
        Self::open(path, Box::new(ColorFgBg))
    }

    /// The stored preference, which may be `HostPreference`.
    #[must_use]
    pub const fn variant(&self) -> AppearanceVariant {
        self.variant
    }

    /// Store a new preference. Persists it, then notifies subscribers
    /// with the new resolution. Setting the already-stored variant is a
    /// complete no-op: no write, no notification.
    ///
    /// Returns whether the stored preference changed.
    pub fn set(&mut self, variant: AppearanceVariant) -> bool {
        if variant == self.variant {
            return false;
        }
        self.variant = variant;
        self.persist().ok();
        let resolved = self.resolve();
        self.notify(resolved);
        true
    }

    /// [`set`](Self::set), but from an untrusted tag string. Unknown tags
    /// are rejected silently: nothing stored, nothing written, nobody
    /// notified.
    pub fn set_tag(&mut self, tag: &str) -> bool {
        match AppearanceVariant::from_tag(tag) {
            Some(variant) => self.set(variant),
            None => false,
        }
    }

    /// Resolve the stored preference to something paintable. Concrete
    /// variants are their own resolution; `host-preference` asks the
    /// signal, fresh on every call.
    #[must_use]
    pub fn resolve(&self) -> ResolvedVariant {
        self.variant
            .concrete()
            .unwrap_or_else(|| match self.signal.brightness() {
                Brightness::Dark => ResolvedVariant::Dark,
                Brightness::Light => ResolvedVariant::Light,
            })
    }

    /// Register a change callback. Callbacks fire synchronously from
    /// [`set`](Self::set), in subscription order.
    pub fn subscribe(&mut self, callback: impl FnMut(ResolvedVariant) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns whether it was registered; a second
    /// unsubscribe of the same id is a no-op.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Where the preference is (or would be) persisted.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", self.variant.as_tag()))
    }

    fn notify(&mut self, resolved: ResolvedVariant) {
        for (_, callback) in &mut self.subscribers {
            callback(resolved);
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("path", &self.path)
            .field("variant", &self.variant)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

fn load_variant(path: &Path) -> AppearanceVariant {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| AppearanceVariant::from_tag(raw.trim()))
        .unwrap_or_default()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
