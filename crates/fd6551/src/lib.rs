//! FD6551 segment controller command channel.
//!
//! The FD6551 has no register index byte: each of its registers answers on
//! its own I2C address, and a register write is a single data byte sent to
//! that address. The chip also does not acknowledge in-band, so a NAK is
//! expected and ignored.
//!
//! ```text
//! write(0x34, 0x3F)   →   START | 0x34 W | 0x3F | STOP   (NAK ignored)
//! ```
//!
//! One [`Fd6551`] owns the bus handle behind a [`DeviceLock`], so writes
//! from several callers are serialised per device. Higher layers (the
//! seven-segment display) use it through [`RegisterWrite`].
//!
//! Bus failures other than NAK are passed through as [`Error::Bus`];
//! transient and permanent failures look the same to the caller.

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

pub mod diag;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::i2c::I2c;

use platform::{write_ignore_nak, DeviceLock, Error, RegisterWrite};

pub use diag::{DiagnosticCommand, ParseError, USAGE};

/// Devicetree compatible string.
pub const COMPATIBLE: &str = "fdhisi,fd6551";

/// Driver name, also the name of the diagnostic attribute group.
pub const DRIVER_NAME: &str = "fd6551";

/// Highest valid 7-bit register address.
pub const MAX_REGISTER_ADDR: u8 = 0x7F;

/// FD6551 command channel.
pub struct Fd6551<M: RawMutex, I> {
    bus: DeviceLock<M, I>,
    address: u8,
}

impl<M: RawMutex, I: I2c> Fd6551<M, I> {
    /// Bind to a controller. `address` is the address the board declares for
    /// the device; register writes do not use it.
    pub fn new(i2c: I, address: u8) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("fd6551: init at {=u8:#x}", address);
        Self {
            bus: DeviceLock::new(i2c),
            address,
        }
    }

    /// Address the device was bound at.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write `val` to register `addr`.
    ///
    /// Fails with [`Error::Interrupted`] if [`interrupt`](Self::interrupt)
    /// is called while waiting for another writer, and with
    /// [`Error::InvalidArgument`] if `addr` is not a 7-bit address.
    pub async fn write(&self, addr: u8, val: u8) -> Result<(), Error<I::Error>> {
        if addr > MAX_REGISTER_ADDR {
            return Err(Error::InvalidArgument);
        }
        let mut i2c = self.bus.lock().await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("fd6551: addr: {=u8:#x}, val: {=u8:#x}", addr, val);

        write_ignore_nak(&mut *i2c, addr, &[val])
            .await
            .map_err(Error::Bus)
    }

    /// Parse a diagnostic command (`"<addr> <val>"`) and send it.
    ///
    /// Malformed input is rejected before any bus traffic.
    pub async fn run_diagnostic(&self, input: &str) -> Result<(), Error<I::Error>> {
        let cmd = DiagnosticCommand::parse(input).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::error!("fd6551: bad diagnostic command: {}", _e);
            Error::InvalidArgument
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("fd6551: Sending: {=u8:#x}, {=u8:#x}", cmd.addr, cmd.val);

        self.write(cmd.addr, cmd.val).await
    }

    /// Interrupt a caller currently waiting for the bus.
    pub fn interrupt(&self) {
        self.bus.interrupt();
    }

    /// Unbind and hand back the bus.
    pub fn release(self) -> I {
        self.bus.into_inner()
    }
}

impl<M: RawMutex, I: I2c> RegisterWrite for Fd6551<M, I> {
    type BusError = I::Error;

    async fn write_register(&self, addr: u8, val: u8) -> Result<(), Error<I::Error>> {
        self.write(addr, val).await
    }

    fn interrupt(&self) {
        self.bus.interrupt();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embassy_futures::join::join;
    use embassy_futures::yield_now;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use platform::mocks::{MockI2cError, RecordingI2c};

    type TestChannel = Fd6551<NoopRawMutex, RecordingI2c>;

    #[tokio::test]
    async fn write_sends_one_byte_to_register_address() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        fd.write(0x34, 0x3F).await.unwrap();
        fd.write(0x35, 0x06).await.unwrap();

        let i2c = fd.release();
        assert_eq!(i2c.writes(), &[(0x34, vec![0x3F]), (0x35, vec![0x06])]);
    }

    #[tokio::test]
    async fn bound_address_is_not_changed_by_writes() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        fd.write(0x34, 0x00).await.unwrap();
        assert_eq!(fd.address(), 0x24);
    }

    #[tokio::test]
    async fn nak_counts_as_success() {
        let mut i2c = RecordingI2c::new();
        i2c.fail_nth(0, ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        let fd = TestChannel::new(i2c, 0x24);

        assert_eq!(fd.write(0x34, 0x3F).await, Ok(()));
    }

    #[tokio::test]
    async fn bus_error_is_propagated() {
        let mut i2c = RecordingI2c::new();
        i2c.fail_nth(0, ErrorKind::Bus);
        let fd = TestChannel::new(i2c, 0x24);

        assert_eq!(
            fd.write(0x34, 0x3F).await,
            Err(Error::Bus(MockI2cError(ErrorKind::Bus)))
        );
    }

    #[tokio::test]
    async fn eight_bit_register_address_rejected_without_traffic() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        assert_eq!(fd.write(0x80, 0x01).await, Err(Error::InvalidArgument));
        assert!(fd.release().writes().is_empty());
    }

    #[tokio::test]
    async fn interrupted_wait_returns_retry_error() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        let held = fd.bus.lock().await.unwrap();

        let (result, ()) = join(fd.write(0x34, 0x3F), async {
            yield_now().await;
            fd.interrupt();
        })
        .await;
        let err = result.unwrap_err();
        assert_eq!(err, Error::Interrupted);
        assert!(err.is_retry());

        drop(held);
        fd.write(0x34, 0x3F).await.unwrap();
        assert_eq!(fd.release().writes(), &[(0x34, vec![0x3F])]);
    }

    #[tokio::test]
    async fn diagnostic_command_is_forwarded() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        fd.run_diagnostic("0x48 0x01\n").await.unwrap();
        assert_eq!(fd.release().writes(), &[(0x48, vec![0x01])]);
    }

    #[tokio::test]
    async fn malformed_diagnostic_command_sends_nothing() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        assert_eq!(fd.run_diagnostic("0x48").await, Err(Error::InvalidArgument));
        assert_eq!(fd.run_diagnostic("zz 1").await, Err(Error::InvalidArgument));
        assert!(fd.release().writes().is_empty());
    }

    #[tokio::test]
    async fn usable_through_register_write_seam() {
        let fd = TestChannel::new(RecordingI2c::new(), 0x24);
        fd.write_register(0x36, 0x5B).await.unwrap();
        (&fd).write_register(0x37, 0x4F).await.unwrap();
        assert_eq!(
            fd.release().writes(),
            &[(0x36, vec![0x5B]), (0x37, vec![0x4F])]
        );
    }
}
