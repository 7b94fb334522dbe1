//! Seven-segment display composed on a segment controller.
//!
//! ```text
//! "12:34" ──► SEG7_DEFAULT_MAP ──► mirror? ──► one write per digit
//! "usb"=1 ──► glyph bit ──────────────────────► whole indicator byte
//! ```
//!
//! The controller is anything implementing [`platform::RegisterWrite`],
//! normally an `fd6551::Fd6551` or a reference
//! to one. The display never talks to the bus itself.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod display;
pub mod glyph;
pub mod map;

pub use display::{parse_switch, SevenSegmentDisplay, MAX_DIGITS};
pub use glyph::{GlyphRegistry, MAX_GLYPHS};
pub use map::{map_to_seg7, mirror, Seg7Map, SEG7_DEFAULT_MAP};

/// Devicetree compatible string.
pub const COMPATIBLE: &str = "seven-segment-display";

/// Driver name, also the name of the attribute group.
pub const DRIVER_NAME: &str = "seg7disp";
