// SPDX-License-Identifier: MIT
//
// Color — sRGB color with alpha, plus the compact per-cell encoding.
//
// The palette this engine renders is authored in sRGB (hex values and
// rgba() glow colors), so sRGB is the working space. The only color math
// the shell needs is mixing (gradient ramps across glyph runs) and
// alpha compositing (glow halos over the scene backdrop) — both happen
// in *linear* light, because averaging gamma-encoded components produces
// muddy midpoints and dark halo seams.
//
// Two types, two jobs:
//
//   Color     — f32 sRGB + alpha. What painting code passes around.
//               May be translucent; compositing resolves that.
//   CellColor — the 4-byte resolved form stored in every Cell. No alpha,
//               so frame diffing is a plain comparison and ANSI output
//               never defers blending.
//
// Compositing is only defined over concrete RGB backgrounds. Painting a
// translucent color over `CellColor::Default` (the terminal's own
// background, which we cannot read) or an indexed color just drops the
// alpha — scene fills are always RGB, so this never happens in practice.

// ─── Color ───────────────────────────────────────────────────────────────────

/// An sRGB color with straight (non-premultiplied) alpha.
///
/// Components are in `[0.0, 1.0]`. Construction clamps nothing; painting
/// quantizes through [`to_rgb8`](Color::to_rgb8), which clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red, sRGB-encoded.
    pub r: f32,
    /// Green, sRGB-encoded.
    pub g: f32,
    /// Blue, sRGB-encoded.
    pub b: f32,
    /// Straight alpha: 0.0 fully transparent, 1.0 fully opaque.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::srgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::srgb(1.0, 1.0, 1.0);
    /// Fully transparent (painting a background with this is a no-op).
    pub const TRANSPARENT: Self = Self::srgba(0.0, 0.0, 0.0, 0.0);

    // ─── Construction ────────────────────────────────────────────────────

    /// Opaque color from sRGB components in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub const fn srgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from sRGB components and alpha, all in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub const fn srgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit sRGB components.
    #[inline]
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Color from 8-bit sRGB components and 8-bit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex string (leading `#` optional).
    ///
    /// Returns `None` for any other length or for non-hex digits.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s).as_bytes();
        if digits.len() != 6 {
            return None;
        }
        let byte = |i: usize| -> Option<u8> {
            let hi = hex_val(digits[i])?;
            let lo = hex_val(digits[i + 1])?;
            Some(hi << 4 | lo)
        };
        Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?))
    }

    /// The same color with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this color is fully opaque (alpha ≥ 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Whether this color is fully transparent (alpha ≤ 0.0).
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    // ─── Mixing & Compositing ────────────────────────────────────────────

    /// Interpolate toward `other` in linear light.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`. Alpha is
    /// interpolated linearly. This is the primitive behind gradient
    /// ramps: sampling `mix` at evenly spaced `t` across a glyph run
    /// gives a perceptually smooth sweep with no dark midpoint.
    #[must_use]
    pub fn mix(self, other: &Self, t: f32) -> Self {
        let lerp = |a: f32, b: f32| {
            let la = srgb_to_linear(a);
            let lb = srgb_to_linear(b);
            linear_to_srgb((lb - la).mul_add(t, la))
        };
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: (other.a - self.a).mul_add(t, self.a),
        }
    }

    /// Composite `self` over an opaque-or-translucent destination
    /// (source-over, straight alpha, blended in linear light).
    #[must_use]
    pub fn blend_over(self, dst: &Self) -> Self {
        if self.is_opaque() {
            return self;
        }
        if self.is_transparent() {
            return *dst;
        }

        let sa = self.a;
        let da = dst.a * (1.0 - sa);
        let out_a = sa + da;
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: f32, d: f32| {
            let lin = srgb_to_linear(d).mul_add(da, srgb_to_linear(s) * sa) / out_a;
            linear_to_srgb(lin)
        };
        Self {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: out_a,
        }
    }

    // ─── Resolution to CellColor ─────────────────────────────────────────

    /// Quantize to 8-bit sRGB components (clamped).
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f32| {
            // Clamp before scaling: out-of-range inputs must not wrap.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let v = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            v
        };
        (q(self.r), q(self.g), q(self.b))
    }

    /// The resolved per-cell form, discarding alpha.
    #[must_use]
    pub fn to_cell_color(self) -> CellColor {
        let (r, g, b) = self.to_rgb8();
        CellColor::Rgb(r, g, b)
    }

    /// Composite over an existing cell background and resolve.
    ///
    /// Opaque colors skip the blend (the common fast path). Translucent
    /// colors blend over RGB backgrounds in linear light; over `Default`
    /// or indexed backgrounds (whose actual RGB we cannot know) the
    /// alpha is dropped.
    #[must_use]
    pub fn resolve_over(self, background: &CellColor) -> CellColor {
        if self.is_opaque() {
            return self.to_cell_color();
        }
        match *background {
            CellColor::Rgb(r, g, b) => {
                self.blend_over(&Self::rgb8(r, g, b)).to_cell_color()
            }
            CellColor::Default | CellColor::Ansi256(_) => self.to_cell_color(),
        }
    }
}

/// Decode one ASCII hex digit.
const fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// The resolved color stored in a [`Cell`](crate::cell::Cell) — 4 bytes,
/// no alpha, cheap to compare in the diff loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    /// The terminal's own default foreground/background.
    Default,
    /// An index into the terminal's 256-color palette.
    Ansi256(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

impl CellColor {
    /// Whether this is the terminal default.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

// ─── sRGB Transfer Function ──────────────────────────────────────────────────

/// Decode one sRGB-encoded component to linear light (IEC 61966-2-1).
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode one linear-light component to sRGB (IEC 61966-2-1).
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
