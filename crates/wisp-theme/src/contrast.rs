// SPDX-License-Identifier: MIT

//! WCAG contrast checks for the appearance palettes.
//!
//! The variant tables promise two floors:
//!
//! - body text >= 4.5:1 against the backdrop (AA, normal text)
//! - emphasis tint >= 3.0:1 (AA, large text and UI components)
//!
//! These functions make the promises executable — the palette tests call
//! them instead of trusting hand-picked hex values to stay honest.

use wisp_term::color::{Color, srgb_to_linear};

/// Relative luminance per WCAG 2.1: linearized sRGB channels weighted
/// 0.2126 / 0.7152 / 0.0722. Returns a value in `[0.0, 1.0]`.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let r = f64::from(srgb_to_linear(color.r));
    let g = f64::from(srgb_to_linear(color.g));
    let b = f64::from(srgb_to_linear(color.b));
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// WCAG 2.1 contrast ratio, `(L_lighter + 0.05) / (L_darker + 0.05)`.
///
/// Always in `[1.0, 21.0]` and symmetric in its arguments. Alpha is
/// ignored; callers composite translucent colors before measuring.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
