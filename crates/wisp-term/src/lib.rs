// SPDX-License-Identifier: MIT
//
// wisp-term — Terminal rendering engine for wisp.
//
// A small, sRGB-with-alpha terminal backend built for a site that runs
// at 60 frames per second: differential rendering that only touches
// changed cells, stateful ANSI output that skips redundant escapes,
// any-motion pointer tracking for the cursor-chasing orb, and a color
// type that composites translucent accents in linear light.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. Every byte sent to the terminal is
// accounted for. Every frame is diffed. Every escape code is earned.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
