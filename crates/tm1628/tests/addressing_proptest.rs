//! Property tests for LED addressing and mode selection.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::HashSet;

use platform::{ConfigError, Error};
use tm1628::chip::{CHIPS, TM1628};
use tm1628::{led_location, select_mode, LedLocation, Mode};

fn loc(grid: u32, seg: u32) -> Result<LedLocation, Error<()>> {
    led_location(&TM1628, grid, seg)
}

#[test]
fn addressing_is_injective_on_every_chip() {
    for chip in CHIPS {
        let max_seg = u32::try_from(chip.bytes_per_grid() * 8).unwrap();
        let mut seen = HashSet::new();
        for grid in 1..=chip.max_grid() {
            for seg in 1..=max_seg {
                let l: LedLocation = led_location::<()>(chip, grid, seg).unwrap();
                assert!(l.offset < chip.data_len(), "{} ({grid}, {seg})", chip.compatible);
                assert!(seen.insert(l), "{} ({grid}, {seg}) aliases", chip.compatible);
            }
        }
    }
}

#[test]
fn seven_grid_chip_rejects_grid_eight() {
    assert_eq!(loc(3, 9), Ok(LedLocation { offset: 5, bit: 0 }));
    assert_eq!(loc(8, 1), Err(Error::InvalidArgument));
}

#[test]
fn popcounts_4_to_7_select_by_grid_count() {
    let modes = [
        Mode { grid_mask: 0b1_1110, seg_mask: 0x7FE },
        Mode { grid_mask: 0b11_1110, seg_mask: 0x7FE },
        Mode { grid_mask: 0b111_1110, seg_mask: 0x7FE },
        Mode { grid_mask: 0b1111_1110, seg_mask: 0x7FE },
    ];
    assert_eq!(select_mode(&modes, 6), Ok(2));
}

proptest::proptest! {
    /// Any coordinate with a component out of range is rejected.
    #[test]
    fn out_of_range_components_fail(grid in 0u32..64, seg in 0u32..64) {
        let in_range = (1..=7).contains(&grid) && (1..=16).contains(&seg);
        proptest::prop_assert_eq!(loc(grid, seg).is_ok(), in_range);
    }

    /// The location agrees with the two-bytes-per-grid formula.
    #[test]
    fn two_byte_formula(grid in 1u32..=7, seg in 1u32..=16) {
        let l = loc(grid, seg).unwrap();
        let mut offset = usize::try_from((grid - 1) * 2).unwrap();
        let mut bit = seg - 1;
        if bit >= 8 {
            bit -= 8;
            offset += 1;
        }
        proptest::prop_assert_eq!(l, LedLocation { offset, bit: u8::try_from(bit).unwrap() });
    }

    /// A grid count matching exactly one entry selects that entry; none fails.
    #[test]
    fn mode_selection_is_deterministic(grids in 0u32..20) {
        let expected = TM1628.modes.iter().position(|m| m.grids() == grids);
        match select_mode(TM1628.modes, grids) {
            Ok(i) => proptest::prop_assert_eq!(Some(i), expected),
            Err(e) => {
                proptest::prop_assert_eq!(e, ConfigError::GridsOutOfRange(grids));
                proptest::prop_assert!(expected.is_none());
            }
        }
    }
}
