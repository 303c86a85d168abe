// SPDX-License-Identifier: MIT

//! Ambient brightness signal from the host terminal.
//!
//! The `host-preference` variant defers to whatever the terminal reports
//! about its own background. The probe sits behind a trait — real
//! terminal or test double, the store cannot tell — and is re-queried on
//! every resolve. A terminal flipped from dark to light mid-session is
//! picked up by the next resolve, no restart.

/// What the host terminal says about its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    Dark,
    Light,
}

/// A source of ambient brightness. Queried lazily, never cached.
pub trait HostSignal {
    fn brightness(&self) -> Brightness;
}

/// The `COLORFGBG` convention, the one signal old enough to be near
/// universal: rxvt-descended terminals export `"fg;bg"` (some insert a
/// `default` field in the middle), where the last field is the background
/// palette index.
///
/// Indices 0-6 and 8 are the dark half of the classic 16-color palette;
/// everything else is light. An absent or unparsable variable reads as
/// dark.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorFgBg;

impl HostSignal for ColorFgBg {
    fn brightness(&self) -> Brightness {
        std::env::var("COLORFGBG").map_or(Brightness::Dark, |raw| parse_colorfgbg(&raw))
    }
}

fn parse_colorfgbg(raw: &str) -> Brightness {
    let background = raw
        .rsplit(';')
        .next()
        .and_then(|field| field.trim().parse::<u8>().ok());
    match background {
        Some(index) if index <= 6 || index == 8 => Brightness::Dark,
        Some(_) => Brightness::Light,
        None => Brightness::Dark,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
