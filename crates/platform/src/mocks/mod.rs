//! Recording bus mocks for host tests.
//!
//! Unlike `embedded-hal-mock`, these do not check a list of expected
//! transactions. They record whatever the driver sends and can be told to
//! fail the n-th write with a chosen error kind, which is what the
//! partial-update and NAK tests need.

#![cfg(any(test, feature = "std"))]

use std::cell::RefCell;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind as I2cErrorKind, ErrorType as I2cErrorType, Operation as I2cOperation};
use embedded_hal::spi::{ErrorKind as SpiErrorKind, ErrorType as SpiErrorType, Operation as SpiOperation};

use crate::{Error, RegisterWrite};

/// Bus error produced by [`RecordingI2c`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError(pub I2cErrorKind);

impl embedded_hal::i2c::Error for MockI2cError {
    fn kind(&self) -> I2cErrorKind {
        self.0
    }
}

/// I2C bus that records every write as `(address, bytes)`.
#[derive(Debug, Default)]
pub struct RecordingI2c {
    writes: Vec<(u8, Vec<u8>)>,
    fail: Option<(usize, I2cErrorKind)>,
}

impl RecordingI2c {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th write (0-based) with `kind`. The write is still recorded.
    pub fn fail_nth(&mut self, n: usize, kind: I2cErrorKind) {
        self.fail = Some((n, kind));
    }

    /// Writes seen so far.
    pub fn writes(&self) -> &[(u8, Vec<u8>)] {
        &self.writes
    }
}

impl I2cErrorType for RecordingI2c {
    type Error = MockI2cError;
}

impl embedded_hal_async::i2c::I2c for RecordingI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [I2cOperation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter() {
            if let I2cOperation::Write(data) = op {
                let index = self.writes.len();
                self.writes.push((address, data.to_vec()));
                if let Some((n, kind)) = self.fail {
                    if n == index {
                        return Err(MockI2cError(kind));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Bus error produced by [`RecordingSpi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError(pub SpiErrorKind);

impl embedded_hal::spi::Error for MockSpiError {
    fn kind(&self) -> SpiErrorKind {
        self.0
    }
}

/// SPI device that records each transaction as a list of write segments.
#[derive(Debug, Default)]
pub struct RecordingSpi {
    transactions: Vec<Vec<Vec<u8>>>,
    fail: Option<usize>,
}

impl RecordingSpi {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th transaction (0-based). It is still recorded.
    pub fn fail_nth(&mut self, n: usize) {
        self.fail = Some(n);
    }

    /// Transactions seen so far.
    pub fn transactions(&self) -> &[Vec<Vec<u8>>] {
        &self.transactions
    }
}

impl SpiErrorType for RecordingSpi {
    type Error = MockSpiError;
}

impl embedded_hal_async::spi::SpiDevice for RecordingSpi {
    async fn transaction(
        &mut self,
        operations: &mut [SpiOperation<'_, u8>],
    ) -> Result<(), Self::Error> {
        let index = self.transactions.len();
        let segments = operations
            .iter()
            .filter_map(|op| match op {
                SpiOperation::Write(data) => Some(data.to_vec()),
                _ => None,
            })
            .collect();
        self.transactions.push(segments);
        if self.fail == Some(index) {
            return Err(MockSpiError(SpiErrorKind::Other));
        }
        Ok(())
    }
}

/// [`RegisterWrite`] implementation that records `(register, value)` pairs.
#[derive(Debug, Default)]
pub struct RecordingRegisters {
    writes: RefCell<Vec<(u8, u8)>>,
    fail: Option<usize>,
}

impl RecordingRegisters {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th register write (0-based). Failed writes are not recorded.
    pub fn fail_nth(&mut self, n: usize) {
        self.fail = Some(n);
    }

    /// Successful writes so far.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.writes.borrow().clone()
    }
}

impl RegisterWrite for RecordingRegisters {
    type BusError = ();

    async fn write_register(&self, addr: u8, val: u8) -> Result<(), Error<()>> {
        let mut writes = self.writes.borrow_mut();
        if self.fail == Some(writes.len()) {
            return Err(Error::Bus(()));
        }
        writes.push((addr, val));
        Ok(())
    }
}
