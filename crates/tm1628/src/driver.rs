//! TM1628 family driver.
//!
//! # Bus protocol
//!
//! Every command is its own SPI transaction (one byte, chip select toggled
//! around it). Display RAM writes are one transaction with two write
//! segments: the data-setting command byte, then the payload.
//!
//! ```text
//! set_led(3, 9, on)   →   [0xC5]            address 5
//!                         [0x40] [0x01]     write one byte
//! ```
//!
//! # State
//!
//! The driver keeps a copy of display RAM and the backlight properties
//! behind its [`DeviceLock`]. A write only updates the copy once the bus
//! accepted it.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::spi::{Operation, SpiDevice};
use heapless::Vec;

use platform::description::Name;
use platform::{ConfigError, DeviceLock, Error, MatrixDescription};

use crate::addressing::{led_location, select_mode, LedLocation};
use crate::backlight::Backlight;
use crate::chip::{ChipInfo, Mode, MAX_DATA_LEN};
use crate::command::Command;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Most LEDs one controller can register.
pub const MAX_LEDS: usize = 64;

// ---------------------------------------------------------------------------
// LEDs
// ---------------------------------------------------------------------------

/// One LED registered from the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Led {
    name: Name,
    grid: u32,
    seg: u32,
    location: LedLocation,
    default_trigger: Option<Name>,
}

impl Led {
    /// Label, taken from the description node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid number.
    pub fn grid(&self) -> u32 {
        self.grid
    }

    /// Segment number.
    pub fn seg(&self) -> u32 {
        self.seg
    }

    /// Where the LED lives in display RAM.
    pub fn location(&self) -> LedLocation {
        self.location
    }

    /// Trigger the board asked for, if any.
    pub fn default_trigger(&self) -> Option<&str> {
        self.default_trigger.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Bus helpers
// ---------------------------------------------------------------------------

async fn send<SPI: SpiDevice>(
    spi: &mut SPI,
    chip: &ChipInfo,
    cmd: Command,
) -> Result<(), Error<SPI::Error>> {
    let byte = cmd.encode(chip).ok_or(Error::InvalidArgument)?;
    spi.write(&[byte]).await.map_err(Error::Bus)
}

async fn write_data<SPI: SpiDevice>(
    spi: &mut SPI,
    chip: &ChipInfo,
    data: &[u8],
) -> Result<(), Error<SPI::Error>> {
    if data.len() > chip.data_len() {
        return Err(Error::InvalidArgument);
    }
    let cmd = [Command::WriteData
        .encode(chip)
        .ok_or(Error::InvalidArgument)?];
    spi.transaction(&mut [Operation::Write(&cmd), Operation::Write(data)])
        .await
        .map_err(Error::Bus)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

struct Matrix<SPI> {
    spi: SPI,
    data: Vec<u8, MAX_DATA_LEN>,
    backlight: Backlight,
}

/// TM1628 (and compatible) LED controller.
pub struct Tm1628<M: RawMutex, SPI> {
    chip: &'static ChipInfo,
    mode_index: usize,
    mode: Mode,
    leds: Vec<Led, MAX_LEDS>,
    state: DeviceLock<M, Matrix<SPI>>,
}

impl<M: RawMutex, SPI: SpiDevice> Tm1628<M, SPI> {
    /// Bring the controller up from its description.
    ///
    /// Turns the display off, picks the wiring mode from `#grids` (or the
    /// chip default), registers the LEDs, clears display RAM, selects the
    /// mode and turns the display back on at the default brightness.
    ///
    /// LEDs not wired in the selected mode are skipped. An LED whose `reg`
    /// is not `<grid seg>` fails the probe.
    pub async fn probe(mut spi: SPI, desc: &MatrixDescription) -> Result<Self, Error<SPI::Error>> {
        let chip =
            ChipInfo::from_compatible(&desc.compatible).ok_or(ConfigError::UnknownCompatible)?;
        let backlight = Backlight::new(chip.default_pwm);

        send(&mut spi, chip, backlight.with_blank(true).command())
            .await
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::error!("tm1628: Turning display off failed");
                e
            })?;

        let mut data = Vec::new();
        data.resize(chip.data_len(), 0)
            .map_err(|_| Error::InvalidArgument)?;

        let mode_index = match desc.grids {
            Some(grids) => select_mode(chip.modes, grids).map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::error!("tm1628: #grids out of range ({=u32})", grids);
                e
            })?,
            None => chip.default_mode,
        };
        let mode = *chip.mode(mode_index).ok_or(Error::InvalidArgument)?;

        let mut leds = Vec::new();
        for node in &desc.leds {
            let (grid, seg) = node.grid_seg().ok_or(ConfigError::InvalidLedReg)?;
            if !mode.contains(grid, seg) {
                #[cfg(feature = "defmt")]
                defmt::warn!("tm1628: {=str} reg out of range", node.name.as_str());
                continue;
            }
            leds.push(Led {
                name: node.name.clone(),
                grid,
                seg,
                location: led_location(chip, grid, seg)?,
                default_trigger: node.default_trigger.clone(),
            })
            .map_err(|_| ConfigError::TooManyLeds)?;
        }

        send(&mut spi, chip, Command::Address(0)).await?;
        write_data(&mut spi, chip, &data).await?;
        let mode_cmd = u8::try_from(mode_index).map_err(|_| Error::InvalidArgument)?;
        send(&mut spi, chip, Command::DisplayMode(mode_cmd)).await?;
        send(&mut spi, chip, backlight.command()).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "tm1628: {=str} mode {=usize}, {=usize} LEDs",
            chip.compatible,
            mode_index,
            leds.len()
        );

        Ok(Self {
            chip,
            mode_index,
            mode,
            leds,
            state: DeviceLock::new(Matrix {
                spi,
                data,
                backlight,
            }),
        })
    }

    /// Chip description.
    pub fn chip(&self) -> &'static ChipInfo {
        self.chip
    }

    /// Selected wiring mode index.
    pub fn mode_index(&self) -> usize {
        self.mode_index
    }

    /// Selected wiring mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Registered LEDs; the index is the LED id.
    pub fn leds(&self) -> &[Led] {
        &self.leds
    }

    /// Id of the LED called `name`.
    pub fn find_led(&self, name: &str) -> Option<usize> {
        self.leds.iter().position(|l| l.name.as_str() == name)
    }

    /// Grids above the active mode's last grid are not scanned.
    fn locate(&self, grid: u32, seg: u32) -> Result<LedLocation, Error<SPI::Error>> {
        if grid > self.mode.max_grid() {
            return Err(Error::InvalidArgument);
        }
        led_location(self.chip, grid, seg)
    }

    /// Switch the LED at `(grid, seg)` and write the byte holding it.
    ///
    /// Coordinates outside the chip's range or past the active mode's last
    /// grid fail with [`Error::InvalidArgument`] before any bus traffic.
    pub async fn set_led(&self, grid: u32, seg: u32, on: bool) -> Result<(), Error<SPI::Error>> {
        let loc = self.locate(grid, seg)?;
        let addr = u8::try_from(loc.offset).map_err(|_| Error::InvalidArgument)?;

        let mut m = self.state.lock().await?;
        let current = *m.data.get(loc.offset).ok_or(Error::InvalidArgument)?;
        let next = if on {
            current | loc.mask()
        } else {
            current & !loc.mask()
        };

        send(&mut m.spi, self.chip, Command::Address(addr)).await?;
        write_data(&mut m.spi, self.chip, &[next]).await?;
        if let Some(byte) = m.data.get_mut(loc.offset) {
            *byte = next;
        }
        Ok(())
    }

    /// State of the LED at `(grid, seg)`.
    pub async fn led(&self, grid: u32, seg: u32) -> Result<bool, Error<SPI::Error>> {
        let loc = self.locate(grid, seg)?;
        let m = self.state.lock().await?;
        let byte = m.data.get(loc.offset).ok_or(Error::InvalidArgument)?;
        Ok(byte & loc.mask() != 0)
    }

    /// Switch registered LED `id`.
    pub async fn set_led_brightness(&self, id: usize, on: bool) -> Result<(), Error<SPI::Error>> {
        let led = self.leds.get(id).ok_or(Error::InvalidArgument)?;
        self.set_led(led.grid, led.seg, on).await
    }

    /// State of registered LED `id`.
    pub async fn led_brightness(&self, id: usize) -> Result<bool, Error<SPI::Error>> {
        let led = self.leds.get(id).ok_or(Error::InvalidArgument)?;
        self.led(led.grid, led.seg).await
    }

    /// Set the backlight level (`0..=7`) and push it.
    pub async fn set_brightness(&self, level: u8) -> Result<(), Error<SPI::Error>> {
        let mut m = self.state.lock().await?;
        let next = m
            .backlight
            .with_brightness(level)
            .ok_or(Error::InvalidArgument)?;
        send(&mut m.spi, self.chip, next.command()).await?;
        m.backlight = next;
        Ok(())
    }

    /// Blank or unblank the display and push it.
    pub async fn set_blank(&self, blanked: bool) -> Result<(), Error<SPI::Error>> {
        let mut m = self.state.lock().await?;
        let next = m.backlight.with_blank(blanked);
        send(&mut m.spi, self.chip, next.command()).await?;
        m.backlight = next;
        Ok(())
    }

    /// Power the display on or off.
    pub async fn set_power(&self, on: bool) -> Result<(), Error<SPI::Error>> {
        self.set_blank(!on).await
    }

    /// Resend the display control command for the current backlight state.
    pub async fn update_backlight(&self) -> Result<(), Error<SPI::Error>> {
        let mut m = self.state.lock().await?;
        let cmd = m.backlight.command();
        send(&mut m.spi, self.chip, cmd).await
    }

    /// Current backlight state.
    pub async fn backlight(&self) -> Result<Backlight, Error<SPI::Error>> {
        Ok(self.state.lock().await?.backlight)
    }

    /// Copy of display RAM as last written.
    pub async fn data(&self) -> Result<Vec<u8, MAX_DATA_LEN>, Error<SPI::Error>> {
        Ok(self.state.lock().await?.data.clone())
    }

    /// Interrupt a caller waiting for the controller.
    pub fn interrupt(&self) {
        self.state.interrupt();
    }

    /// Unbind and hand back the SPI device.
    pub fn release(self) -> SPI {
        self.state.into_inner().spi
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
