//! Named indicator glyphs sharing one status byte.
//!
//! Glyph `i` in registration order owns bit `i` of the indicator register.
//! The registry is filled once at probe time and never changes afterwards.

use heapless::Vec;
use platform::description::{name, Name};
use platform::ConfigError;

/// Most glyphs one display can register.
pub const MAX_GLYPHS: usize = 7;

/// One registered glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    name: Name,
    bit: u8,
}

impl Glyph {
    /// Glyph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bit in the indicator byte.
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// Indicator byte mask.
    pub fn mask(&self) -> u8 {
        1u8.checked_shl(u32::from(self.bit)).unwrap_or(0)
    }
}

/// Ordered, bounded glyph table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphRegistry {
    glyphs: Vec<Glyph, MAX_GLYPHS>,
}

impl GlyphRegistry {
    /// Empty registry.
    pub const fn new() -> Self {
        Self { glyphs: Vec::new() }
    }

    /// Register every name in order.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for n in names {
            registry.register(n)?;
        }
        Ok(registry)
    }

    /// Append a glyph and return its bit.
    pub fn register(&mut self, glyph_name: &str) -> Result<u8, ConfigError> {
        let bit = u8::try_from(self.glyphs.len()).map_err(|_| ConfigError::TooManyGlyphs)?;
        self.glyphs
            .push(Glyph {
                name: name(glyph_name)?,
                bit,
            })
            .map_err(|_| ConfigError::TooManyGlyphs)?;
        Ok(bit)
    }

    /// Look up a glyph by name. With duplicate names the first one wins.
    pub fn get(&self, glyph_name: &str) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.name.as_str() == glyph_name)
    }

    /// Registered glyphs in bit order.
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }

    /// Number of registered glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// `state` with `glyph`'s bit set or cleared.
pub fn apply(state: u8, glyph: &Glyph, on: bool) -> u8 {
    if on {
        state | glyph.mask()
    } else {
        state & !glyph.mask()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bits_follow_registration_order() {
        let reg = GlyphRegistry::from_names(["alarm", "usb", "play"]).unwrap();
        assert_eq!(reg.get("alarm").unwrap().bit(), 0);
        assert_eq!(reg.get("play").unwrap().mask(), 0b100);
        assert!(reg.get("pause").is_none());
        let names: std::vec::Vec<&str> = reg.iter().map(Glyph::name).collect();
        assert_eq!(names, ["alarm", "usb", "play"]);
    }

    #[test]
    fn eighth_glyph_is_rejected() {
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        assert_eq!(
            GlyphRegistry::from_names(names),
            Err(ConfigError::TooManyGlyphs)
        );
        assert_eq!(GlyphRegistry::from_names(names.into_iter().take(7)).unwrap().len(), 7);
    }

    #[test]
    fn apply_only_touches_own_bit() {
        let reg = GlyphRegistry::from_names(["alarm", "usb"]).unwrap();
        let usb = reg.get("usb").unwrap();
        assert_eq!(apply(0b0001, usb, true), 0b0011);
        assert_eq!(apply(0b0011, usb, false), 0b0001);
        assert_eq!(apply(0b0001, usb, false), 0b0001);
    }
}
