//! ASCII to seven-segment patterns.
//!
//! Segments are lettered clockwise from the top, `g` is the middle bar:
//!
//! ```text
//!    a
//!  f   b
//!    g
//!  e   c
//!    d
//! ```
//!
//! Segment `a` is bit 0 and `g` is bit 6. Bit 7 (decimal point) is never
//! set by the map.

/// Segment `a` (top).
pub const SEG_A: u8 = 1 << 0;
/// Segment `b` (top right).
pub const SEG_B: u8 = 1 << 1;
/// Segment `c` (bottom right).
pub const SEG_C: u8 = 1 << 2;
/// Segment `d` (bottom).
pub const SEG_D: u8 = 1 << 3;
/// Segment `e` (bottom left).
pub const SEG_E: u8 = 1 << 4;
/// Segment `f` (top left).
pub const SEG_F: u8 = 1 << 5;
/// Segment `g` (middle).
pub const SEG_G: u8 = 1 << 6;

/// All seven segments.
pub const SEG_MASK: u8 = 0x7F;

#[allow(clippy::too_many_arguments, clippy::arithmetic_side_effects)]
const fn s(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8) -> u8 {
    a | b << 1 | c << 2 | d << 3 | e << 4 | f << 5 | g << 6
}

/// Character table, indexed by ASCII code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seg7Map {
    table: [u8; 128],
}

impl Seg7Map {
    /// Build a map from a full table.
    pub const fn new(table: [u8; 128]) -> Self {
        Self { table }
    }

    /// Pattern for `c`. Codes outside the table render blank.
    pub fn pattern(&self, c: u8) -> u8 {
        self.table.get(usize::from(c)).copied().unwrap_or(0) & SEG_MASK
    }
}

impl Default for Seg7Map {
    fn default() -> Self {
        SEG7_DEFAULT_MAP
    }
}

/// The usual alphanumeric rendering. Control characters, space and DEL are
/// blank; letters without a sensible shape borrow the nearest one.
pub const SEG7_DEFAULT_MAP: Seg7Map = Seg7Map::new(default_table());

const fn default_table() -> [u8; 128] {
    let mut t = [0u8; 128];
    let symbols_33_47 = [
        s(0, 0, 0, 0, 1, 1, 0), // !
        s(0, 1, 0, 0, 0, 1, 0), // "
        s(0, 1, 1, 0, 1, 1, 0), // #
        s(1, 0, 1, 1, 0, 1, 1), // $
        s(0, 0, 1, 0, 0, 1, 0), // %
        s(1, 0, 1, 1, 1, 1, 1), // &
        s(0, 0, 0, 0, 0, 1, 0), // '
        s(1, 0, 0, 1, 1, 1, 0), // (
        s(1, 1, 1, 1, 0, 0, 0), // )
        s(0, 1, 1, 0, 1, 1, 1), // *
        s(0, 1, 1, 0, 0, 0, 1), // +
        s(0, 0, 0, 0, 1, 0, 0), // ,
        s(0, 0, 0, 0, 0, 0, 1), // -
        s(0, 0, 0, 0, 1, 0, 0), // .
        s(0, 1, 0, 0, 1, 0, 1), // /
    ];
    let digits = [
        s(1, 1, 1, 1, 1, 1, 0),
        s(0, 1, 1, 0, 0, 0, 0),
        s(1, 1, 0, 1, 1, 0, 1),
        s(1, 1, 1, 1, 0, 0, 1),
        s(0, 1, 1, 0, 0, 1, 1),
        s(1, 0, 1, 1, 0, 1, 1),
        s(1, 0, 1, 1, 1, 1, 1),
        s(1, 1, 1, 0, 0, 0, 0),
        s(1, 1, 1, 1, 1, 1, 1),
        s(1, 1, 1, 1, 0, 1, 1),
    ];
    let symbols_58_64 = [
        s(0, 0, 0, 1, 0, 0, 1), // :
        s(0, 0, 0, 1, 0, 0, 1), // ;
        s(1, 0, 0, 0, 0, 1, 1), // <
        s(0, 0, 0, 1, 0, 0, 1), // =
        s(1, 1, 0, 0, 0, 0, 1), // >
        s(1, 1, 1, 0, 0, 1, 0), // ?
        s(1, 1, 0, 1, 1, 1, 1), // @
    ];
    let upper = [
        s(1, 1, 1, 0, 1, 1, 1), // A
        s(1, 1, 1, 1, 1, 1, 1), // B
        s(1, 0, 0, 1, 1, 1, 0), // C
        s(1, 1, 1, 1, 1, 1, 0), // D
        s(1, 0, 0, 1, 1, 1, 1), // E
        s(1, 0, 0, 0, 1, 1, 1), // F
        s(1, 1, 1, 1, 0, 1, 1), // G
        s(0, 1, 1, 0, 1, 1, 1), // H
        s(0, 1, 1, 0, 0, 0, 0), // I
        s(0, 1, 1, 1, 0, 0, 0), // J
        s(0, 1, 1, 0, 1, 1, 1), // K
        s(0, 0, 0, 1, 1, 1, 0), // L
        s(1, 1, 1, 0, 1, 1, 0), // M
        s(1, 1, 1, 0, 1, 1, 0), // N
        s(1, 1, 1, 1, 1, 1, 0), // O
        s(1, 1, 0, 0, 1, 1, 1), // P
        s(1, 1, 1, 1, 1, 1, 0), // Q
        s(1, 1, 1, 0, 1, 1, 1), // R
        s(1, 0, 1, 1, 0, 1, 1), // S
        s(0, 0, 0, 1, 1, 1, 1), // T
        s(0, 1, 1, 1, 1, 1, 0), // U
        s(0, 1, 1, 1, 1, 1, 0), // V
        s(0, 1, 1, 1, 1, 1, 1), // W
        s(0, 1, 1, 0, 1, 1, 1), // X
        s(0, 1, 1, 0, 0, 1, 1), // Y
        s(1, 1, 0, 1, 1, 0, 1), // Z
    ];
    let symbols_91_96 = [
        s(1, 0, 0, 1, 1, 1, 0), // [
        s(0, 0, 1, 0, 0, 1, 1), // backslash
        s(1, 1, 1, 1, 0, 0, 0), // ]
        s(1, 1, 0, 0, 0, 1, 0), // ^
        s(0, 0, 0, 1, 0, 0, 0), // _
        s(0, 1, 0, 0, 0, 0, 0), // `
    ];
    let lower = [
        s(1, 1, 1, 0, 1, 1, 1), // a
        s(0, 0, 1, 1, 1, 1, 1), // b
        s(0, 0, 0, 1, 1, 0, 1), // c
        s(0, 1, 1, 1, 1, 0, 1), // d
        s(1, 0, 0, 1, 1, 1, 1), // e
        s(1, 0, 0, 0, 1, 1, 1), // f
        s(1, 1, 1, 1, 0, 1, 1), // g
        s(0, 0, 1, 0, 1, 1, 1), // h
        s(0, 0, 1, 0, 0, 0, 0), // i
        s(0, 0, 1, 1, 0, 0, 0), // j
        s(0, 0, 1, 0, 1, 1, 1), // k
        s(0, 0, 0, 0, 1, 1, 0), // l
        s(1, 1, 1, 0, 1, 1, 0), // m
        s(0, 0, 1, 0, 1, 0, 1), // n
        s(0, 0, 1, 1, 1, 0, 1), // o
        s(1, 1, 0, 0, 1, 1, 1), // p
        s(1, 1, 1, 0, 0, 1, 1), // q
        s(0, 0, 0, 0, 1, 0, 1), // r
        s(1, 0, 1, 1, 0, 1, 1), // s
        s(0, 0, 0, 1, 1, 1, 1), // t
        s(0, 0, 1, 1, 1, 0, 0), // u
        s(0, 0, 1, 1, 1, 0, 0), // v
        s(0, 1, 1, 1, 1, 1, 1), // w
        s(0, 1, 1, 0, 1, 1, 1), // x
        s(0, 1, 1, 1, 0, 1, 1), // y
        s(1, 1, 0, 1, 1, 0, 1), // z
    ];
    let symbols_123_126 = [
        s(1, 0, 0, 1, 1, 1, 0), // {
        s(0, 0, 0, 0, 1, 1, 0), // |
        s(1, 1, 1, 1, 0, 0, 0), // }
        s(1, 0, 0, 0, 0, 0, 0), // ~
    ];

    t = fill(t, 33, &symbols_33_47);
    t = fill(t, 48, &digits);
    t = fill(t, 58, &symbols_58_64);
    t = fill(t, 65, &upper);
    t = fill(t, 91, &symbols_91_96);
    t = fill(t, 97, &lower);
    t = fill(t, 123, &symbols_123_126);
    t
}

#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
const fn fill(mut table: [u8; 128], start: usize, patterns: &[u8]) -> [u8; 128] {
    // Const context: bounds are fixed by the callers above.
    let mut i = 0;
    while i < patterns.len() {
        table[start + i] = patterns[i];
        i += 1;
    }
    table
}

/// Map `c` through [`SEG7_DEFAULT_MAP`].
pub fn map_to_seg7(c: u8) -> u8 {
    SEG7_DEFAULT_MAP.pattern(c)
}

/// Rotate a pattern by 180° for a display mounted upside down.
///
/// Swaps a↔d, b↔e, c↔f and keeps g. Bit 7 is dropped.
pub const fn mirror(pattern: u8) -> u8 {
    const fn swap(pattern: u8, x: u8, y: u8) -> u8 {
        let mut out = 0;
        if pattern & x != 0 {
            out |= y;
        }
        if pattern & y != 0 {
            out |= x;
        }
        out
    }
    (pattern & SEG_G)
        | swap(pattern, SEG_A, SEG_D)
        | swap(pattern, SEG_B, SEG_E)
        | swap(pattern, SEG_C, SEG_F)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn digits_render_as_expected() {
        assert_eq!(map_to_seg7(b'0'), 0x3F);
        assert_eq!(map_to_seg7(b'1'), 0x06);
        assert_eq!(map_to_seg7(b'8'), 0x7F);
        assert_eq!(map_to_seg7(b'9'), 0x6F);
    }

    #[test]
    fn blanks_and_out_of_table_codes() {
        assert_eq!(map_to_seg7(b' '), 0);
        assert_eq!(map_to_seg7(0), 0);
        assert_eq!(map_to_seg7(0x7F), 0);
        assert_eq!(map_to_seg7(0xC3), 0);
    }

    #[test]
    fn letters_and_symbols() {
        assert_eq!(map_to_seg7(b'A'), 0x77);
        assert_eq!(map_to_seg7(b'b'), 0x7C);
        assert_eq!(map_to_seg7(b'-'), SEG_G);
        assert_eq!(map_to_seg7(b'_'), SEG_D);
    }

    #[test]
    fn mirror_swaps_opposite_segments() {
        assert_eq!(mirror(SEG_A), SEG_D);
        assert_eq!(mirror(SEG_B | SEG_C), SEG_E | SEG_F);
        assert_eq!(mirror(SEG_G), SEG_G);
        // "1" upside down lights the left column.
        assert_eq!(mirror(map_to_seg7(b'1')), SEG_E | SEG_F);
        assert_eq!(mirror(0x80), 0);
    }

    #[test]
    fn custom_map_is_used() {
        let mut table = [0u8; 128];
        table[usize::from(b'x')] = SEG_G;
        let map = Seg7Map::new(table);
        assert_eq!(map.pattern(b'x'), SEG_G);
        assert_eq!(map.pattern(b'0'), 0);
    }
}
