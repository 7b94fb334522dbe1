//! Chip variants, wiring modes and PWM presets.
//!
//! Grid `n` is bit `n` of a grid mask and segment `n` is bit `n` of a
//! segment mask; bit 0 is never used.

// Table construction only; every shift amount is a literal below 32.
#![allow(clippy::arithmetic_side_effects)]

/// `GENMASK(high, low)`.
const fn genmask(high: u32, low: u32) -> u32 {
    (u32::MAX >> (31 - high)) & (u32::MAX << low)
}

const fn bit(n: u32) -> u32 {
    1 << n
}

/// One wiring configuration: which grids and segments are pinned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mode {
    /// Usable grids.
    pub grid_mask: u16,
    /// Usable segments.
    pub seg_mask: u32,
}

impl Mode {
    #[allow(clippy::cast_possible_truncation)]
    const fn new(grid_mask: u32, seg_mask: u32) -> Self {
        Self {
            grid_mask: grid_mask as u16,
            seg_mask,
        }
    }

    /// Number of grids this mode drives.
    pub const fn grids(&self) -> u32 {
        self.grid_mask.count_ones()
    }

    /// Highest grid this mode drives, `0` for an empty mask.
    pub const fn max_grid(&self) -> u32 {
        15u32.saturating_sub(self.grid_mask.leading_zeros())
    }

    /// `true` if `(grid, seg)` is wired in this mode.
    pub fn contains(&self, grid: u32, seg: u32) -> bool {
        let grid_ok = 1u16.checked_shl(grid).is_some_and(|b| self.grid_mask & b != 0);
        let seg_ok = 1u32.checked_shl(seg).is_some_and(|b| self.seg_mask & b != 0);
        grid_ok && seg_ok
    }
}

/// PWM duty cycle of one brightness preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmDuty {
    /// On time.
    pub duty_cycle: u8,
    /// Period, in the same unit.
    pub period: u8,
}

const fn duty(duty_cycle: u8) -> PwmDuty {
    PwmDuty {
        duty_cycle,
        period: 16,
    }
}

/// Duty cycle for each of the eight brightness levels.
pub const PWM_MAP: [PwmDuty; 8] = [
    duty(1),
    duty(2),
    duty(4),
    duty(10),
    duty(11),
    duty(12),
    duty(13),
    duty(14),
];

/// Supported controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    /// Titan Micro TM1628.
    Tm1628,
    /// Fuda Hisi FD628.
    Fd628,
    /// Holtek HT16515 (12 grids, 24 segments).
    Ht16515,
    /// Fude AiP1618.
    Aip1618,
}

/// Static description of one controller.
#[derive(Debug, PartialEq, Eq)]
pub struct ChipInfo {
    /// Which chip this is.
    pub variant: ChipVariant,
    /// Devicetree compatible string.
    pub compatible: &'static str,
    /// Every grid the chip can drive.
    pub grid_mask: u16,
    /// Every segment the chip can drive.
    pub seg_mask: u32,
    /// Wiring modes, indexed by display-mode command value.
    pub modes: &'static [Mode],
    /// Mode used when the board does not say how many grids it has.
    pub default_mode: usize,
    /// Brightness level set at probe.
    pub default_pwm: u8,
    /// Bits of the display-mode command that carry the mode index.
    pub mode_mask: u8,
    /// Bits of the address command that carry the RAM address.
    pub address_mask: u8,
}

const TM1628_MODES: [Mode; 4] = [
    Mode::new(genmask(4, 1), genmask(14, 12) | genmask(10, 1)),
    Mode::new(genmask(5, 1), genmask(13, 12) | genmask(10, 1)),
    Mode::new(genmask(6, 1), bit(12) | genmask(10, 1)),
    Mode::new(genmask(7, 1), genmask(10, 1)),
];

const HT16515_MODES: [Mode; 16] = [
    Mode::new(genmask(4, 1), genmask(24, 1)),
    Mode::new(genmask(5, 1), genmask(23, 1)),
    Mode::new(genmask(6, 1), genmask(22, 1)),
    Mode::new(genmask(7, 1), genmask(21, 1)),
    Mode::new(genmask(8, 1), genmask(20, 1)),
    Mode::new(genmask(9, 1), genmask(19, 1)),
    Mode::new(genmask(10, 1), genmask(18, 1)),
    Mode::new(genmask(11, 1), genmask(17, 1)),
    // Every value with bit 3 set selects 12 grids.
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
    Mode::new(genmask(12, 1), genmask(6, 1)),
];

const AIP1618_MODES: [Mode; 4] = [
    Mode::new(genmask(4, 1), genmask(14, 12) | genmask(5, 1)),
    Mode::new(genmask(5, 1), genmask(13, 12) | genmask(5, 1)),
    Mode::new(genmask(6, 1), bit(12) | genmask(5, 1)),
    Mode::new(genmask(7, 1), genmask(5, 1)),
];

#[allow(clippy::cast_possible_truncation)]
const GRIDS_1_7: u16 = genmask(7, 1) as u16;

/// Titan Micro TM1628.
pub static TM1628: ChipInfo = ChipInfo {
    variant: ChipVariant::Tm1628,
    compatible: "titanmec,tm1628",
    grid_mask: GRIDS_1_7,
    seg_mask: genmask(14, 12) | genmask(10, 1),
    modes: &TM1628_MODES,
    default_mode: 3,
    default_pwm: 0,
    mode_mask: 0x03,
    address_mask: 0x0F,
};

/// Fuda Hisi FD628, register compatible with the TM1628.
pub static FD628: ChipInfo = ChipInfo {
    variant: ChipVariant::Fd628,
    compatible: "fdhisi,fd628",
    grid_mask: GRIDS_1_7,
    seg_mask: genmask(14, 12) | genmask(10, 1),
    modes: &TM1628_MODES,
    default_mode: 3,
    default_pwm: 0,
    mode_mask: 0x03,
    address_mask: 0x0F,
};

/// Holtek HT16515.
#[allow(clippy::cast_possible_truncation)]
pub static HT16515: ChipInfo = ChipInfo {
    variant: ChipVariant::Ht16515,
    compatible: "holtek,ht16515",
    grid_mask: genmask(12, 1) as u16,
    seg_mask: genmask(24, 1),
    modes: &HT16515_MODES,
    default_mode: 8,
    default_pwm: 0,
    mode_mask: 0x0F,
    address_mask: 0x3F,
};

/// Fude AiP1618.
pub static AIP1618: ChipInfo = ChipInfo {
    variant: ChipVariant::Aip1618,
    compatible: "szfdwdz,aip1618",
    grid_mask: GRIDS_1_7,
    seg_mask: genmask(14, 12) | genmask(5, 1),
    modes: &AIP1618_MODES,
    default_mode: 3,
    default_pwm: 0,
    mode_mask: 0x03,
    address_mask: 0x0F,
};

/// Every supported chip.
pub static CHIPS: [&ChipInfo; 4] = [&TM1628, &FD628, &HT16515, &AIP1618];

/// Largest display RAM of any supported chip.
pub const MAX_DATA_LEN: usize = 36;

impl ChipInfo {
    /// Look a chip up by its compatible string.
    pub fn from_compatible(compatible: &str) -> Option<&'static ChipInfo> {
        CHIPS.iter().copied().find(|c| c.compatible == compatible)
    }

    /// Highest grid number.
    pub const fn max_grid(&self) -> u32 {
        (u16::BITS - 1).saturating_sub(self.grid_mask.leading_zeros())
    }

    /// Highest segment number.
    pub const fn max_seg(&self) -> u32 {
        (u32::BITS - 1).saturating_sub(self.seg_mask.leading_zeros())
    }

    /// Display RAM bytes per grid.
    pub const fn bytes_per_grid(&self) -> usize {
        self.max_seg().div_ceil(8) as usize
    }

    /// Display RAM size in bytes.
    pub const fn data_len(&self) -> usize {
        self.bytes_per_grid() * self.max_grid() as usize
    }

    /// Mode `index`, if the chip has one.
    pub fn mode(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn genmask_matches_kernel_definition() {
        assert_eq!(genmask(4, 1), 0b1_1110);
        assert_eq!(genmask(14, 12) | genmask(10, 1), 0x77FE);
        assert_eq!(genmask(31, 0), u32::MAX);
    }

    #[test]
    fn compatible_lookup() {
        assert_eq!(
            ChipInfo::from_compatible("holtek,ht16515").unwrap().variant,
            ChipVariant::Ht16515
        );
        assert_eq!(
            ChipInfo::from_compatible("fdhisi,fd628").unwrap().variant,
            ChipVariant::Fd628
        );
        assert!(ChipInfo::from_compatible("titanmec,tm1640").is_none());
    }

    #[test]
    fn ram_geometry() {
        assert_eq!(TM1628.max_grid(), 7);
        assert_eq!(TM1628.max_seg(), 14);
        assert_eq!(TM1628.bytes_per_grid(), 2);
        assert_eq!(TM1628.data_len(), 14);
        assert_eq!(AIP1618.data_len(), 14);
        assert_eq!(HT16515.bytes_per_grid(), 3);
        assert_eq!(HT16515.data_len(), 36);
        assert!(CHIPS.iter().all(|c| c.data_len() <= MAX_DATA_LEN));
    }

    #[test]
    fn default_modes_exist_and_fit_the_command() {
        for chip in CHIPS {
            let index = u8::try_from(chip.default_mode).unwrap();
            assert!(chip.mode(chip.default_mode).is_some());
            assert_eq!(index & !chip.mode_mask, 0);
            assert_eq!(chip.modes.len(), usize::from(chip.mode_mask) + 1);
        }
    }

    #[test]
    fn mode_membership() {
        let m = TM1628_MODES[0];
        assert_eq!(m.grids(), 4);
        assert!(m.contains(4, 14));
        assert!(!m.contains(5, 1));
        assert!(!m.contains(1, 11));
        assert!(!m.contains(0, 1));
        assert!(!m.contains(1, 0));
        assert!(!m.contains(u32::MAX, 1));
    }

    #[test]
    fn pwm_presets_are_increasing() {
        assert!(PWM_MAP.windows(2).all(|w| w[0].duty_cycle < w[1].duty_cycle));
        assert!(PWM_MAP.iter().all(|p| p.period == 16));
    }
}
