//! Hardware descriptions read once at probe time.
//!
//! These mirror the board-level nodes a driver needs. A seven-segment
//! display is described like this:
//!
//! ```text
//! display {
//!     display-controller = <&fd6551>;
//!     digits  { reg = <0x34 0x35 0x36 0x37>; digits-flipped; };
//!     glyphs  { reg = <0x33>; glyph-names = "alarm", "usb", "play", ...; };
//!     enable  { reg = <0x24>; };
//! };
//! ```
//!
//! and an LED matrix like this:
//!
//! ```text
//! vfd {
//!     compatible = "titanmec,tm1628";
//!     #grids = <7>;
//!     led-0 { reg = <3 9>; linux,default-trigger = "heartbeat"; };
//! };
//! ```
//!
//! Register cells are kept as raw `u32` here; drivers validate them when
//! they probe. With the `serde` feature enabled every type can be loaded
//! from JSON, postcard or any other serde format.

use crate::ConfigError;

/// Capacity of a [`Name`].
pub const NAME_LEN: usize = 32;

/// Most digit addresses a description can carry.
pub const MAX_DIGIT_CELLS: usize = 16;

/// Most glyph names a description can carry (drivers may accept fewer).
pub const MAX_GLYPH_NAMES: usize = 16;

/// Most LED child nodes a description can carry.
pub const MAX_LED_NODES: usize = 64;

/// Most cells an LED `reg` property can carry.
pub const MAX_REG_CELLS: usize = 4;

/// Fixed-capacity name (node names, glyph names, compatible strings).
pub type Name = heapless::String<NAME_LEN>;

/// Build a [`Name`], failing if `s` does not fit.
pub fn name(s: &str) -> Result<Name, ConfigError> {
    let mut n = Name::new();
    n.push_str(s).map_err(|_| ConfigError::NameTooLong)?;
    Ok(n)
}

/// Seven-segment display composed on top of a segment controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct DisplayDescription {
    /// Label of the controller device (`display-controller` phandle).
    #[cfg_attr(feature = "serde", serde(default))]
    pub controller: Option<Name>,
    /// Digit registers, left to right.
    #[cfg_attr(feature = "serde", serde(default))]
    pub digits: Option<DigitsNode>,
    /// Glyph register and names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub glyphs: Option<GlyphsNode>,
    /// Display enable register.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enable: Option<EnableNode>,
}

/// `digits` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct DigitsNode {
    /// One bus address per digit.
    pub reg: heapless::Vec<u32, MAX_DIGIT_CELLS>,
    /// The display is mounted upside down.
    #[cfg_attr(feature = "serde", serde(default, rename = "digits-flipped"))]
    pub flipped: bool,
}

impl DigitsNode {
    /// Build a digits node from a slice of register cells.
    pub fn new(reg: &[u32], flipped: bool) -> Result<Self, ConfigError> {
        let reg = heapless::Vec::from_slice(reg).map_err(|_| ConfigError::TooManyDigits)?;
        Ok(Self { reg, flipped })
    }
}

/// `glyphs` node. Glyph `i` is bit `i` of the shared indicator register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct GlyphsNode {
    /// Indicator register address.
    pub reg: u32,
    /// Glyph names, in bit order.
    #[cfg_attr(feature = "serde", serde(rename = "glyph-names"))]
    pub names: heapless::Vec<Name, MAX_GLYPH_NAMES>,
}

impl GlyphsNode {
    /// Build a glyphs node from a register and a list of names.
    pub fn new(reg: u32, names: &[&str]) -> Result<Self, ConfigError> {
        let mut out = heapless::Vec::new();
        for n in names {
            out.push(name(n)?).map_err(|_| ConfigError::TooManyGlyphs)?;
        }
        Ok(Self { reg, names: out })
    }
}

/// `enable` node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct EnableNode {
    /// Enable register address.
    pub reg: u32,
}

/// Grid/segment LED matrix controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct MatrixDescription {
    /// Chip compatible string, e.g. `titanmec,tm1628`.
    pub compatible: Name,
    /// Number of grids wired on the board (`#grids`).
    #[cfg_attr(feature = "serde", serde(default, rename = "#grids"))]
    pub grids: Option<u32>,
    /// One child node per LED.
    #[cfg_attr(feature = "serde", serde(default))]
    pub leds: heapless::Vec<LedNode, MAX_LED_NODES>,
}

impl MatrixDescription {
    /// Description with no LEDs.
    pub fn new(compatible: &str, grids: Option<u32>) -> Result<Self, ConfigError> {
        Ok(Self {
            compatible: name(compatible)?,
            grids,
            leds: heapless::Vec::new(),
        })
    }

    /// Append an LED node.
    pub fn with_led(mut self, led: LedNode) -> Result<Self, ConfigError> {
        self.leds.push(led).map_err(|_| ConfigError::TooManyLeds)?;
        Ok(self)
    }
}

/// LED child node of a [`MatrixDescription`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct LedNode {
    /// Node name, used as the LED's label.
    pub name: Name,
    /// `<grid seg>`.
    pub reg: heapless::Vec<u32, MAX_REG_CELLS>,
    /// Trigger to attach by default (informational).
    #[cfg_attr(feature = "serde", serde(default, rename = "linux,default-trigger"))]
    pub default_trigger: Option<Name>,
}

impl LedNode {
    /// LED at `(grid, seg)`.
    pub fn new(label: &str, grid: u32, seg: u32) -> Result<Self, ConfigError> {
        Self::with_reg(label, &[grid, seg])
    }

    /// LED with an arbitrary `reg` property, including malformed ones.
    pub fn with_reg(label: &str, reg: &[u32]) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name(label)?,
            reg: heapless::Vec::from_slice(reg).map_err(|_| ConfigError::InvalidLedReg)?,
            default_trigger: None,
        })
    }

    /// Set the default trigger.
    pub fn with_trigger(mut self, trigger: &str) -> Result<Self, ConfigError> {
        self.default_trigger = Some(name(trigger)?);
        Ok(self)
    }

    /// `(grid, seg)` if `reg` has exactly two cells.
    pub fn grid_seg(&self) -> Option<(u32, u32)> {
        match self.reg.as_slice() {
            [grid, seg] => Some((*grid, *seg)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_overlong_strings() {
        assert!(name("alarm").is_ok());
        let long = "x".repeat(NAME_LEN + 1);
        assert_eq!(name(&long), Err(ConfigError::NameTooLong));
    }

    #[test]
    fn glyph_names_keep_bit_order() {
        let g = GlyphsNode::new(0x33, &["alarm", "usb", "play"]).unwrap();
        let names: Vec<&str> = g.names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["alarm", "usb", "play"]);
    }

    #[test]
    fn led_reg_must_have_two_cells() {
        assert_eq!(LedNode::new("a", 3, 9).unwrap().grid_seg(), Some((3, 9)));
        assert_eq!(LedNode::with_reg("b", &[3]).unwrap().grid_seg(), None);
        assert_eq!(LedNode::with_reg("c", &[1, 2, 3]).unwrap().grid_seg(), None);
    }

    #[test]
    fn too_many_digit_cells_rejected() {
        let cells = [0x34u32; MAX_DIGIT_CELLS + 1];
        assert_eq!(DigitsNode::new(&cells, false), Err(ConfigError::TooManyDigits));
    }
}
