//! Shared platform layer for the auxiliary display drivers.
//!
//! The driver crates (`fd6551`, `seg7disp`, `tm1628`) are thin translation
//! layers between an `embedded-hal-async` bus and a few bytes of device
//! state. This crate holds what they share:
//!
//! ```text
//! Board firmware (owns buses, parses board description)
//!         ↓
//! Driver crates (fd6551, seg7disp, tm1628)
//!         ↓
//! Platform layer (this crate: errors, locks, descriptions, bus seams)
//!         ↓
//! embedded-hal-async bus implementation (Embassy HAL, Linux spidev, ...)
//! ```
//!
//! - [`Error`] / [`ConfigError`] - the error taxonomy used by every driver
//! - [`lock::DeviceLock`] - per-device interruptible mutex
//! - [`description`] - typed board/hardware descriptions read at probe time
//! - [`bus`] - I2C write helper with NAK suppression and the
//!   [`RegisterWrite`] seam used by composed drivers
//! - [`mocks`] - recording bus mocks for host tests (`std` feature)
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and [`mocks`]
//! - `serde`: `Deserialize` for the description types
//! - `defmt`: `defmt::Format` derives and bus logging

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register and chip names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod bus;
pub mod description;
pub mod error;
pub mod lock;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use bus::{write_ignore_nak, RegisterWrite};
pub use description::{
    DigitsNode, DisplayDescription, EnableNode, GlyphsNode, LedNode, MatrixDescription, Name,
};
pub use error::{ConfigError, Error};
pub use lock::{DeviceLock, Interrupted};
