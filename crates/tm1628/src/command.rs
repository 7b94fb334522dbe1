//! Command byte encoding.
//!
//! Bits 7:6 select the command, the low bits carry its argument.
//!
//! | Command          | Byte                     |
//! |------------------|--------------------------|
//! | display mode     | `0b00_00mmmm`            |
//! | data setting     | `0b01_000000` (write)    |
//! | display control  | `0b10_00oppp`            |
//! | address setting  | `0b11_aaaaaa`            |

use crate::chip::ChipInfo;

/// Display mode command.
pub const CMD_DISPLAY_MODE: u8 = 0x00;
/// Data setting command.
pub const CMD_DATA_SETTING: u8 = 0x40;
/// Display control command.
pub const CMD_DISPLAY_CTRL: u8 = 0x80;
/// Address setting command.
pub const CMD_ADDRESS_SETTING: u8 = 0xC0;

/// Data setting: write display RAM with auto-increment.
pub const DATA_WRITE: u8 = 0x00;
/// Display control: display on.
pub const DISPLAY_ON: u8 = 1 << 3;
/// Display control: PWM preset bits.
pub const PWM_MASK: u8 = 0x07;

/// One controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Select wiring mode `n`.
    DisplayMode(u8),
    /// Next data bytes go to display RAM.
    WriteData,
    /// Set the RAM address pointer. Excess high bits are dropped.
    Address(u8),
    /// Switch the display on or off and pick a PWM preset.
    DisplayControl {
        /// Display on.
        on: bool,
        /// PWM preset, `0..=7`.
        pwm: u8,
    },
}

impl Command {
    /// Encode for `chip`. `None` if the argument does not fit.
    pub fn encode(self, chip: &ChipInfo) -> Option<u8> {
        match self {
            Self::DisplayMode(mode) => {
                (mode & !chip.mode_mask == 0).then_some(CMD_DISPLAY_MODE | mode)
            }
            Self::WriteData => Some(CMD_DATA_SETTING | DATA_WRITE),
            Self::Address(addr) => Some(CMD_ADDRESS_SETTING | (addr & chip.address_mask)),
            Self::DisplayControl { on, pwm } => (pwm & !PWM_MASK == 0).then(|| {
                let on = if on { DISPLAY_ON } else { 0 };
                CMD_DISPLAY_CTRL | on | pwm
            }),
        }
    }
}
