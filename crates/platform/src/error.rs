//! Error taxonomy shared by all drivers.
//!
//! Four classes of failure exist:
//!
//! | Class            | Variant                     | Retry? |
//! |------------------|-----------------------------|--------|
//! | bus transaction  | [`Error::Bus`]              | caller decides, no auto-retry |
//! | bad argument     | [`Error::InvalidArgument`]  | no     |
//! | lock interrupted | [`Error::Interrupted`]      | yes    |
//! | configuration    | [`Error::Config`] / [`Error::ProbeDefer`] | only `ProbeDefer` |
//!
//! Transient and permanent bus failures are not distinguished: whatever the
//! bus implementation returns is passed through in [`Error::Bus`].

use crate::lock::Interrupted;

/// Driver error, generic over the bus error type `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transaction failed.
    Bus(E),
    /// Argument out of range or malformed; rejected before any bus traffic.
    InvalidArgument,
    /// Waiting for the device lock was interrupted. Try again.
    Interrupted,
    /// A device this one depends on is not available yet. Probe again later.
    ProbeDefer,
    /// The hardware description is missing a required field or is malformed.
    Config(ConfigError),
}

impl<E> Error<E> {
    /// `true` when the operation may succeed if simply repeated.
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Interrupted | Self::ProbeDefer)
    }
}

impl<E> From<Interrupted> for Error<E> {
    fn from(_: Interrupted) -> Self {
        Self::Interrupted
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus transaction failed: {e:?}"),
            Self::InvalidArgument => write!(f, "Invalid argument"),
            Self::Interrupted => write!(f, "Interrupted while waiting for device lock"),
            Self::ProbeDefer => write!(f, "Dependency not ready, probe deferred"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

/// Problems found in a hardware description at probe time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No display controller reference.
    MissingController,
    /// No enable register.
    MissingEnable,
    /// A register cell does not fit a 7-bit bus address.
    InvalidAddress(u32),
    /// More digits than the display layer supports.
    TooManyDigits,
    /// More glyph names than fit in the shared indicator byte.
    TooManyGlyphs,
    /// A name does not fit the fixed-size name buffer.
    NameTooLong,
    /// The compatible string names no supported chip.
    UnknownCompatible,
    /// No wiring mode has this many grids.
    GridsOutOfRange(u32),
    /// An LED `reg` property does not have exactly two cells.
    InvalidLedReg,
    /// More LEDs than the driver can register.
    TooManyLeds,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingController => write!(f, "Display controller property not found"),
            Self::MissingEnable => write!(f, "No 'enable' node found"),
            Self::InvalidAddress(a) => write!(f, "Register 0x{a:x} is not a 7-bit address"),
            Self::TooManyDigits => write!(f, "Too many digits configured"),
            Self::TooManyGlyphs => write!(f, "Too many glyphs configured"),
            Self::NameTooLong => write!(f, "Name too long"),
            Self::UnknownCompatible => write!(f, "Unsupported compatible string"),
            Self::GridsOutOfRange(g) => write!(f, "#grids out of range ({g})"),
            Self::InvalidLedReg => write!(f, "LED reg must be <grid seg>"),
            Self::TooManyLeds => write!(f, "Too many LEDs configured"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_and_defer_are_retryable() {
        assert!(Error::<()>::Interrupted.is_retry());
        assert!(Error::<()>::ProbeDefer.is_retry());
        assert!(!Error::<()>::InvalidArgument.is_retry());
        assert!(!Error::Bus(()).is_retry());
        assert!(!Error::<()>::Config(ConfigError::MissingEnable).is_retry());
    }

    #[test]
    fn interrupted_converts_into_error() {
        let e: Error<()> = Interrupted.into();
        assert_eq!(e, Error::Interrupted);
    }

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(
            ConfigError::GridsOutOfRange(9).to_string(),
            "#grids out of range (9)"
        );
        assert_eq!(
            Error::<()>::Config(ConfigError::InvalidAddress(0x80)).to_string(),
            "Configuration error: Register 0x80 is not a 7-bit address"
        );
    }
}
