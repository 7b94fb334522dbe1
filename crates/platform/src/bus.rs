//! Bus seams shared by the drivers.
//!
//! Two things live here:
//!
//! - [`write_ignore_nak`]: a one-shot I2C write that treats a missing
//!   acknowledge as success, for controllers that never ack in-band.
//!   The target address is a per-call argument; the bus handle itself is
//!   never re-addressed.
//!
//!   This relies on the HAL sending the data bytes even when the address
//!   byte is not acknowledged. Many `embedded-hal` implementations stop at
//!   an address NAK instead, in which case the write is reported as `Ok`
//!   although the data never went out. Boards with a non-acking controller
//!   need a HAL that keeps transmitting after a NAK.
//! - [`RegisterWrite`]: "write this byte to that register", the only
//!   operation a composed driver needs from its controller.

use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::i2c::I2c;

use crate::Error;

/// Write `bytes` to bus address `addr`, ignoring a NAK.
///
/// Any other bus failure is returned unchanged.
pub async fn write_ignore_nak<I: I2c>(i2c: &mut I, addr: u8, bytes: &[u8]) -> Result<(), I::Error> {
    match i2c.write(addr, bytes).await {
        Ok(()) => Ok(()),
        Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => {
            #[cfg(feature = "defmt")]
            defmt::trace!("i2c: NAK from {=u8:#x} ignored", addr);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Single-register write access to a segment controller.
pub trait RegisterWrite {
    /// Error reported by the underlying bus.
    type BusError: core::fmt::Debug;

    /// Write `val` to register `addr`.
    async fn write_register(&self, addr: u8, val: u8) -> Result<(), Error<Self::BusError>>;

    /// Interrupt a caller waiting for the controller. Controllers without a
    /// lock of their own have nobody to wake.
    fn interrupt(&self) {}
}

impl<T: RegisterWrite + ?Sized> RegisterWrite for &T {
    type BusError = T::BusError;

    async fn write_register(&self, addr: u8, val: u8) -> Result<(), Error<Self::BusError>> {
        (**self).write_register(addr, val).await
    }

    fn interrupt(&self) {
        (**self).interrupt();
    }
}
