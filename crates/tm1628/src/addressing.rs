//! Grid/segment to display RAM location, and wiring mode selection.
//!
//! Display RAM holds `bytes_per_grid` bytes per grid, low segments first:
//!
//! ```text
//! offset = (grid - 1) * bytes_per_grid + (seg - 1) / 8
//! bit    = (seg - 1) % 8
//! ```
//!
//! With the two bytes per grid of a TM1628, `(3, 9)` lands on byte 5 bit 0.

use platform::{ConfigError, Error};

use crate::chip::{ChipInfo, Mode};

/// Byte and bit of one LED in display RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLocation {
    /// Byte offset.
    pub offset: usize,
    /// Bit within the byte, `0..8`.
    pub bit: u8,
}

impl LedLocation {
    /// Mask for this LED's bit.
    pub fn mask(&self) -> u8 {
        1u8.checked_shl(u32::from(self.bit)).unwrap_or(0)
    }
}

/// Locate `(grid, seg)` in display RAM.
///
/// Only the chip's numeric range is checked here; whether the board wires
/// that LED in the active mode is [`Mode::contains`].
pub fn led_location<E>(chip: &ChipInfo, grid: u32, seg: u32) -> Result<LedLocation, Error<E>> {
    let bytes_per_grid = chip.bytes_per_grid();
    let max_seg = u32::try_from(bytes_per_grid)
        .ok()
        .and_then(|b| b.checked_mul(8))
        .ok_or(Error::InvalidArgument)?;
    if grid == 0 || grid > chip.max_grid() || seg == 0 || seg > max_seg {
        return Err(Error::InvalidArgument);
    }

    // Both are at least 1 and bounded by the chip above.
    let grid0 = usize::try_from(grid.saturating_sub(1)).map_err(|_| Error::InvalidArgument)?;
    let seg0 = seg.saturating_sub(1);
    let offset = grid0
        .checked_mul(bytes_per_grid)
        .and_then(|o| o.checked_add(usize::try_from(seg0 / 8).ok()?))
        .ok_or(Error::InvalidArgument)?;
    let bit = u8::try_from(seg0 % 8).map_err(|_| Error::InvalidArgument)?;

    Ok(LedLocation { offset, bit })
}

/// Index of the first mode driving exactly `grids` grids.
pub fn select_mode(modes: &[Mode], grids: u32) -> Result<usize, ConfigError> {
    modes
        .iter()
        .position(|m| m.grids() == grids)
        .ok_or(ConfigError::GridsOutOfRange(grids))
}
