//! Whole-display brightness and blanking.

use crate::chip::{PwmDuty, PWM_MAP};
use crate::command::Command;

/// Highest brightness level.
pub const MAX_BRIGHTNESS: u8 = 7;

/// Backlight properties. Nothing is sent until the driver pushes the
/// resulting [`Command::DisplayControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backlight {
    brightness: u8,
    blanked: bool,
}

impl Backlight {
    /// Unblanked backlight at `brightness` (clamped to [`MAX_BRIGHTNESS`]).
    pub fn new(brightness: u8) -> Self {
        Self {
            brightness: brightness.min(MAX_BRIGHTNESS),
            blanked: false,
        }
    }

    /// Current level, `0..=MAX_BRIGHTNESS`.
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the level. Returns `None` above [`MAX_BRIGHTNESS`].
    #[must_use]
    pub fn with_brightness(self, level: u8) -> Option<Self> {
        (level <= MAX_BRIGHTNESS).then_some(Self {
            brightness: level,
            ..self
        })
    }

    /// `true` while the display is blanked.
    pub fn is_blanked(&self) -> bool {
        self.blanked
    }

    /// Blank or unblank.
    #[must_use]
    pub fn with_blank(self, blanked: bool) -> Self {
        Self { blanked, ..self }
    }

    /// PWM preset for the current level.
    pub fn duty(&self) -> Option<PwmDuty> {
        PWM_MAP.get(usize::from(self.brightness)).copied()
    }

    /// Display control command for this state.
    pub fn command(&self) -> Command {
        Command::DisplayControl {
            on: !self.blanked,
            pwm: self.brightness,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn level_is_bounded() {
        let bl = Backlight::new(0);
        assert_eq!(bl.with_brightness(7).unwrap().brightness(), 7);
        assert!(bl.with_brightness(8).is_none());
        assert_eq!(Backlight::new(200).brightness(), MAX_BRIGHTNESS);
    }

    #[test]
    fn every_level_has_a_preset() {
        for level in 0..=MAX_BRIGHTNESS {
            assert!(Backlight::new(level).duty().is_some());
        }
        assert_eq!(Backlight::new(3).duty().unwrap().duty_cycle, 10);
    }

    #[test]
    fn blanking_turns_the_display_off() {
        let bl = Backlight::new(5);
        assert_eq!(bl.command(), Command::DisplayControl { on: true, pwm: 5 });
        let bl = bl.with_blank(true);
        assert!(bl.is_blanked());
        assert_eq!(bl.command(), Command::DisplayControl { on: false, pwm: 5 });
    }
}
