// SPDX-License-Identifier: MIT
//
// The accent palettes — one set per concrete variant.
//
// Each set carries the orb gradient endpoints, the translucent glow the
// halo composites with, the emphasis tint for headings and links, and
// the action color for buttons. The two color-vision-safe sets stay
// inside hue bands their audience can tell apart: greens and teals for
// deuteranopia, blues and cyans for protanopia. Emphasis tints are
// picked to hold at least 3:1 against their scene's backdrop.

use wisp_term::color::Color;

use crate::variant::ResolvedVariant;

/// The five accent roles a variant must fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentSet {
    /// Orb gradient, center color.
    pub gradient_start: Color,
    /// Orb gradient, rim color.
    pub gradient_end: Color,
    /// Halo tint. Translucent; composites over whatever the orb is
    /// passing.
    pub glow: Color,
    /// Headings, links, the selector highlight.
    pub emphasis_text: Color,
    /// Buttons and the call-to-action.
    pub action: Color,
}

/// Scene colors — the ground the accents sit on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub backdrop: Color,
    pub text: Color,
    pub muted: Color,
}

// ─── Accent tables ───────────────────────────────────────────────────────────

/// Violet orb over near-black. #c084fc → #4f46e5.
const DARK: AccentSet = AccentSet {
    gradient_start: Color::rgb8(192, 132, 252),
    gradient_end: Color::rgb8(79, 70, 229),
    glow: Color::rgb8(139, 92, 246).with_alpha(0.8),
    emphasis_text: Color::rgb8(129, 140, 248),
    action: Color::rgb8(79, 70, 229),
};

/// Amber-to-orange over near-white. #facc15 → #f97316.
const LIGHT: AccentSet = AccentSet {
    gradient_start: Color::rgb8(250, 204, 21),
    gradient_end: Color::rgb8(249, 115, 22),
    glow: Color::rgb8(252, 211, 77).with_alpha(0.8),
    emphasis_text: Color::rgb8(234, 88, 12),
    action: Color::rgb8(249, 115, 22),
};

/// Red on pure black. #ef4444 → #000000.
const HIGH_CONTRAST: AccentSet = AccentSet {
    gradient_start: Color::rgb8(239, 68, 68),
    gradient_end: Color::rgb8(0, 0, 0),
    glow: Color::rgb8(239, 68, 68).with_alpha(0.8),
    emphasis_text: Color::rgb8(239, 68, 68),
    action: Color::rgb8(220, 38, 38),
};

/// Green-to-teal band. #4ade80 → #14b8a6.
const DEUTERANOPIA_SAFE: AccentSet = AccentSet {
    gradient_start: Color::rgb8(74, 222, 128),
    gradient_end: Color::rgb8(20, 184, 166),
    glow: Color::rgb8(34, 197, 94).with_alpha(0.8),
    emphasis_text: Color::rgb8(45, 212, 191),
    action: Color::rgb8(13, 148, 136),
};

/// Blue-to-cyan band. #60a5fa → #06b6d4.
const PROTANOPIA_SAFE: AccentSet = AccentSet {
    gradient_start: Color::rgb8(96, 165, 250),
    gradient_end: Color::rgb8(6, 182, 212),
    glow: Color::rgb8(56, 189, 248).with_alpha(0.8),
    emphasis_text: Color::rgb8(56, 189, 248),
    action: Color::rgb8(8, 145, 178),
};

// ─── Scene tables ────────────────────────────────────────────────────────────

const DARK_SCENE: Scene = Scene {
    backdrop: Color::rgb8(17, 24, 39),
    text: Color::rgb8(249, 250, 251),
    muted: Color::rgb8(156, 163, 175),
};

const LIGHT_SCENE: Scene = Scene {
    backdrop: Color::rgb8(248, 250, 252),
    text: Color::rgb8(17, 24, 39),
    muted: Color::rgb8(107, 114, 128),
};

const HIGH_CONTRAST_SCENE: Scene = Scene {
    backdrop: Color::rgb8(0, 0, 0),
    text: Color::rgb8(255, 255, 255),
    muted: Color::rgb8(212, 212, 212),
};

const DEUTERANOPIA_SCENE: Scene = Scene {
    backdrop: Color::rgb8(15, 23, 42),
    text: Color::rgb8(240, 253, 244),
    muted: Color::rgb8(148, 163, 184),
};

const PROTANOPIA_SCENE: Scene = Scene {
    backdrop: Color::rgb8(15, 23, 42),
    text: Color::rgb8(240, 249, 255),
    muted: Color::rgb8(148, 163, 184),
};

/// The accent set for a concrete variant. The match is exhaustive, so
/// a new variant will not compile until it has a palette.
#[must_use]
pub const fn accents(variant: ResolvedVariant) -> &'static AccentSet {
    match variant {
        ResolvedVariant::Light => &LIGHT,
        ResolvedVariant::Dark => &DARK,
        ResolvedVariant::HighContrast => &HIGH_CONTRAST,
        ResolvedVariant::DeuteranopiaSafe => &DEUTERANOPIA_SAFE,
        ResolvedVariant::ProtanopiaSafe => &PROTANOPIA_SAFE,
    }
}

/// The scene colors for a concrete variant.
#[must_use]
pub const fn scene(variant: ResolvedVariant) -> &'static Scene {
    match variant {
        ResolvedVariant::Light => &LIGHT_SCENE,
        ResolvedVariant::Dark => &DARK_SCENE,
        ResolvedVariant::HighContrast => &HIGH_CONTRAST_SCENE,
        ResolvedVariant::DeuteranopiaSafe => &DEUTERANOPIA_SCENE,
        ResolvedVariant::ProtanopiaSafe => &PROTANOPIA_SCENE,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;

    #[test]
    fn accent_sets_are_pairwise_distinct() {
        let sets: Vec<_> = ResolvedVariant::ALL.iter().map(|&v| accents(v)).collect();
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn emphasis_holds_large_text_contrast_on_its_backdrop() {
        for variant in ResolvedVariant::ALL {
            let ratio = contrast_ratio(accents(variant).emphasis_text, scene(variant).backdrop);
            assert!(
                ratio >= 3.0,
                "{}: emphasis contrast {ratio:.2} below 3.0",
                variant.label()
            );
        }
    }

    #[test]
    fn body_text_holds_normal_text_contrast() {
        for variant in ResolvedVariant::ALL {
            let scene = scene(variant);
            let ratio = contrast_ratio(scene.text, scene.backdrop);
            assert!(
                ratio >= 4.5,
                "{}: body contrast {ratio:.2} below 4.5",
                variant.label()
            );
        }
    }

    #[test]
    fn every_glow_is_translucent() {
        for variant in ResolvedVariant::ALL {
            let glow = accents(variant).glow;
            assert!((glow.a - 0.8).abs() < f32::EPSILON);
            assert!(!glow.is_opaque());
        }
    }

    #[test]
    fn gradients_actually_travel() {
        for variant in ResolvedVariant::ALL {
            let set = accents(variant);
            assert_ne!(set.gradient_start, set.gradient_end, "{}", variant.label());
        }
    }

    #[test]
    fn everything_but_glow_is_opaque() {
        for variant in ResolvedVariant::ALL {
            let set = accents(variant);
            assert!(set.gradient_start.is_opaque());
            assert!(set.gradient_end.is_opaque());
            assert!(set.emphasis_text.is_opaque());
            assert!(set.action.is_opaque());
        }
    }

    #[test]
    fn high_contrast_sits_on_pure_black() {
        let scene = scene(ResolvedVariant::HighContrast);
        assert_eq!(scene.backdrop.to_rgb8(), (0, 0, 0));
        assert_eq!(scene.text.to_rgb8(), (255, 255, 255));
    }
}
