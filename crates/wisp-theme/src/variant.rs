// SPDX-License-Identifier: MIT
//
// The stored-vs-resolved variant split.
//
// A user can store "follow the host", but nothing can paint with it —
// painting needs a concrete appearance. Keeping the two as separate
// types makes "the accents of an unresolved preference" unrepresentable
// instead of a runtime check.

/// The stored appearance preference. Exactly six values; only
/// [`HostPreference`](Self::HostPreference) needs the ambient signal
/// before it can paint anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppearanceVariant {
    Light,
    Dark,
    HighContrast,
    DeuteranopiaSafe,
    ProtanopiaSafe,
    /// Follow whatever the host terminal reports. The fallback when no
    /// preference has ever been stored.
    #[default]
    HostPreference,
}

/// A concrete appearance — everything except `host-preference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVariant {
    Light,
    Dark,
    HighContrast,
    DeuteranopiaSafe,
    ProtanopiaSafe,
}

impl AppearanceVariant {
    /// Every variant, in selector display order.
    pub const ALL: [Self; 6] = [
        Self::Light,
        Self::Dark,
        Self::HighContrast,
        Self::DeuteranopiaSafe,
        Self::ProtanopiaSafe,
        Self::HostPreference,
    ];

    /// The canonical tag, as persisted and as accepted by
    /// [`from_tag`](Self::from_tag).
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
            Self::DeuteranopiaSafe => "deuteranopia-safe",
            Self::ProtanopiaSafe => "protanopia-safe",
            Self::HostPreference => "host-preference",
        }
    }

    /// Parse a canonical tag. Anything else — unknown words, wrong case,
    /// stray whitespace — is `None`; the caller decides what rejection
    /// means at its boundary.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "high-contrast" => Some(Self::HighContrast),
            "deuteranopia-safe" => Some(Self::DeuteranopiaSafe),
            "protanopia-safe" => Some(Self::ProtanopiaSafe),
            "host-preference" => Some(Self::HostPreference),
            _ => None,
        }
    }

    /// Human label for the selector UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::HighContrast => "High contrast",
            Self::DeuteranopiaSafe => "Deuteranopia safe",
            Self::ProtanopiaSafe => "Protanopia safe",
            Self::HostPreference => "Follow host",
        }
    }

    /// The concrete variant, unless the preference defers to the host.
    #[must_use]
    pub const fn concrete(self) -> Option<ResolvedVariant> {
        match self {
            Self::Light => Some(ResolvedVariant::Light),
            Self::Dark => Some(ResolvedVariant::Dark),
            Self::HighContrast => Some(ResolvedVariant::HighContrast),
            Self::DeuteranopiaSafe => Some(ResolvedVariant::DeuteranopiaSafe),
            Self::ProtanopiaSafe => Some(ResolvedVariant::ProtanopiaSafe),
            Self::HostPreference => None,
        }
    }
}

impl ResolvedVariant {
    /// Every concrete variant.
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::Dark,
        Self::HighContrast,
        Self::DeuteranopiaSafe,
        Self::ProtanopiaSafe,
    ];

    /// Human label, shown in the footer next to the key hints.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::HighContrast => "High contrast",
            Self::DeuteranopiaSafe => "Deuteranopia safe",
            Self::ProtanopiaSafe => "Protanopia safe",
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_round_trips() {
        for variant in AppearanceVariant::ALL {
            assert_eq!(AppearanceVariant::from_tag(variant.as_tag()), Some(variant));
        }
    }

    #[test]
    fn tags_are_pairwise_distinct() {
        for (i, a) in AppearanceVariant::ALL.iter().enumerate() {
            for b in &AppearanceVariant::ALL[i + 1..] {
                assert_ne!(a.as_tag(), b.as_tag());
            }
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(AppearanceVariant::from_tag("neon"), None);
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert_eq!(AppearanceVariant::from_tag("Dark"), None);
    }

    #[test]
    fn whitespace_is_not_tolerated_here() {
        // Trimming happens where files are read, not in the parser.
        assert_eq!(AppearanceVariant::from_tag(" dark"), None);
    }

    #[test]
    fn default_is_host_preference() {
        assert_eq!(AppearanceVariant::default(), AppearanceVariant::HostPreference);
    }

    #[test]
    fn concrete_covers_everything_but_host_preference() {
        for variant in AppearanceVariant::ALL {
            match variant {
                AppearanceVariant::HostPreference => assert!(variant.concrete().is_none()),
                _ => assert!(variant.concrete().is_some()),
            }
        }
    }

    #[test]
    fn concrete_preserves_identity() {
        assert_eq!(
            AppearanceVariant::HighContrast.concrete(),
            Some(ResolvedVariant::HighContrast)
        );
        assert_eq!(
            AppearanceVariant::DeuteranopiaSafe.concrete(),
            Some(ResolvedVariant::DeuteranopiaSafe)
        );
    }

    #[test]
    fn labels_are_nonempty_and_distinct() {
        for (i, a) in AppearanceVariant::ALL.iter().enumerate() {
            assert!(!a.label().is_empty());
            for b in &AppearanceVariant::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
