//! Driver for TM1628-style grid/segment LED controllers.
//!
//! Supported: Titan Micro TM1628, Fuda Hisi FD628, Fude AiP1618 (7 grids,
//! up to 16 segments) and Holtek HT16515 (12 grids, 24 segments).
//!
//! ```text
//! MatrixDescription ──► probe ──► chip + wiring mode + LEDs
//!                                        │
//!   set_led(grid, seg) ──► RAM copy ──► address cmd + one data byte
//!   set_brightness(n)  ──► display control cmd (on, PWM preset n)
//! ```
//!
//! - [`chip`] - variant tables, wiring modes and PWM presets
//! - [`addressing`] - `(grid, seg)` to display RAM and mode selection
//! - [`command`] - command byte encoding
//! - [`backlight`] - brightness and blanking
//! - [`driver`] - the [`Tm1628`] driver itself

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

pub mod addressing;
pub mod backlight;
pub mod chip;
pub mod command;
pub mod driver;

pub use addressing::{led_location, select_mode, LedLocation};
pub use backlight::{Backlight, MAX_BRIGHTNESS};
pub use chip::{ChipInfo, ChipVariant, Mode, PwmDuty, MAX_DATA_LEN, PWM_MAP};
pub use command::Command;
pub use driver::{Led, Tm1628, MAX_LEDS};

/// Driver name.
pub const DRIVER_NAME: &str = "tm1628";
