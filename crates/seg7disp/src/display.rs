//! Seven-segment display with indicator glyphs.
//!
//! A [`SevenSegmentDisplay`] owns its controller handle and a small amount
//! of mirrored state: the enable flag, the shared glyph byte and the last
//! pattern written to each digit. All of it sits behind one [`DeviceLock`];
//! readers take the same lock as writers.
//!
//! Register layout comes from a [`DisplayDescription`]:
//!
//! | Node     | Register use                                     |
//! |----------|--------------------------------------------------|
//! | `digits` | one register per digit, left to right            |
//! | `glyphs` | one register, glyph `i` is bit `i`               |
//! | `enable` | one register, `1` lights the display, `0` blanks |

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::Vec;

use platform::{ConfigError, DeviceLock, DisplayDescription, Error, RegisterWrite};

use crate::glyph::{self, GlyphRegistry};
use crate::map::{mirror, Seg7Map};

/// Most digits one display can drive.
pub const MAX_DIGITS: usize = 8;

/// Highest valid controller register address.
const MAX_REGISTER_ADDR: u8 = 0x7F;

#[derive(Debug, Default)]
struct DisplayState {
    enabled: bool,
    glyphs: u8,
    digits: Vec<u8, MAX_DIGITS>,
}

/// Seven-segment display composed on top of a register-write controller.
pub struct SevenSegmentDisplay<M: RawMutex, C> {
    controller: C,
    digit_addrs: Vec<u8, MAX_DIGITS>,
    mirrored: bool,
    glyph_addr: u8,
    glyphs: GlyphRegistry,
    enable_addr: u8,
    map: Seg7Map,
    state: DeviceLock<M, DisplayState>,
}

fn register(cell: u32) -> Result<u8, ConfigError> {
    u8::try_from(cell)
        .ok()
        .filter(|a| *a <= MAX_REGISTER_ADDR)
        .ok_or(ConfigError::InvalidAddress(cell))
}

impl<M: RawMutex, C: RegisterWrite> SevenSegmentDisplay<M, C> {
    /// Build a display from its description.
    ///
    /// `lookup` resolves the controller label to a handle. A label that does
    /// not resolve yet yields [`Error::ProbeDefer`]. Nothing is written to
    /// the controller during probe.
    pub fn probe<L>(desc: &DisplayDescription, lookup: L) -> Result<Self, Error<C::BusError>>
    where
        L: FnOnce(&str) -> Option<C>,
    {
        let label = desc
            .controller
            .as_ref()
            .ok_or(ConfigError::MissingController)?;
        let controller = lookup(label).ok_or_else(|| {
            #[cfg(feature = "defmt")]
            defmt::debug!("seg7disp: controller {=str} not ready", label.as_str());
            Error::ProbeDefer
        })?;

        let mut digit_addrs = Vec::new();
        let mut mirrored = false;
        if let Some(digits) = &desc.digits {
            for &cell in &digits.reg {
                digit_addrs
                    .push(register(cell)?)
                    .map_err(|_| ConfigError::TooManyDigits)?;
            }
            mirrored = digits.flipped;
        }

        let (glyph_addr, glyphs) = match &desc.glyphs {
            Some(node) => (
                register(node.reg)?,
                GlyphRegistry::from_names(node.names.iter().map(|n| n.as_str()))?,
            ),
            None => (0, GlyphRegistry::new()),
        };

        let enable_addr = match desc.enable {
            Some(node) if node.reg != 0 => register(node.reg)?,
            _ => return Err(ConfigError::MissingEnable.into()),
        };

        let mut digits = Vec::new();
        for _ in &digit_addrs {
            digits.push(0).map_err(|_| ConfigError::TooManyDigits)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "seg7disp: {=usize} digits, {=usize} glyphs, mirrored: {=bool}",
            digit_addrs.len(),
            glyphs.len(),
            mirrored
        );

        Ok(Self {
            controller,
            digit_addrs,
            mirrored,
            glyph_addr,
            glyphs,
            enable_addr,
            map: Seg7Map::default(),
            state: DeviceLock::new(DisplayState {
                enabled: false,
                glyphs: 0,
                digits,
            }),
        })
    }

    /// Replace the character map.
    #[must_use]
    pub fn with_map(mut self, map: Seg7Map) -> Self {
        self.map = map;
        self
    }

    fn render(&self, c: char) -> u8 {
        let pattern = u8::try_from(c).map_or(0, |b| self.map.pattern(b));
        if self.mirrored {
            mirror(pattern)
        } else {
            pattern
        }
    }

    /// Show `text`, one character per digit.
    ///
    /// Digits past the end of `text` are blanked and extra characters are
    /// ignored. On a bus failure the digits before the failing one keep
    /// their new pattern and the rest are left as they were.
    pub async fn set_digits(&self, text: &str) -> Result<(), Error<C::BusError>> {
        let mut state = self.state.lock().await?;
        let mut chars = text.chars();

        for (&addr, shown) in self.digit_addrs.iter().zip(state.digits.iter_mut()) {
            let pattern = self.render(chars.next().unwrap_or(' '));
            self.controller
                .write_register(addr, pattern)
                .await
                .map_err(|e| {
                    #[cfg(feature = "defmt")]
                    defmt::error!("seg7disp: Failed to write digit at {=u8:#x}", addr);
                    e
                })?;
            *shown = pattern;
        }
        Ok(())
    }

    /// Light (`true`) or blank (`false`) the whole display.
    pub async fn set_enable(&self, on: bool) -> Result<(), Error<C::BusError>> {
        let mut state = self.state.lock().await?;
        self.controller
            .write_register(self.enable_addr, u8::from(on))
            .await?;
        state.enabled = on;
        Ok(())
    }

    /// Turn the glyph called `name` on or off.
    ///
    /// The whole indicator byte is rewritten. An unknown name does nothing
    /// and still returns `Ok(())`.
    pub async fn set_glyph(&self, name: &str, on: bool) -> Result<(), Error<C::BusError>> {
        let Some(g) = self.glyphs.get(name) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("seg7disp: no glyph named {=str}", name);
            return Ok(());
        };

        let mut state = self.state.lock().await?;
        let next = glyph::apply(state.glyphs, g, on);
        self.controller
            .write_register(self.glyph_addr, next)
            .await
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::error!("seg7disp: Failed to write glyphs");
                e
            })?;
        state.glyphs = next;
        Ok(())
    }

    /// Last enable state written.
    pub async fn enabled(&self) -> Result<bool, Error<C::BusError>> {
        Ok(self.state.lock().await?.enabled)
    }

    /// Current indicator byte.
    pub async fn glyph_state(&self) -> Result<u8, Error<C::BusError>> {
        Ok(self.state.lock().await?.glyphs)
    }

    /// State of one glyph, `None` if no glyph has that name.
    pub async fn glyph(&self, name: &str) -> Result<Option<bool>, Error<C::BusError>> {
        let Some(g) = self.glyphs.get(name) else {
            return Ok(None);
        };
        let state = self.state.lock().await?;
        Ok(Some(state.glyphs & g.mask() != 0))
    }

    /// Patterns last written to each digit, after mirroring.
    pub async fn digit_patterns(&self) -> Result<Vec<u8, MAX_DIGITS>, Error<C::BusError>> {
        Ok(self.state.lock().await?.digits.clone())
    }

    /// Registered glyph names in bit order.
    pub fn glyph_names(&self) -> impl Iterator<Item = &str> {
        self.glyphs.iter().map(glyph::Glyph::name)
    }

    /// Number of digits.
    pub fn digit_count(&self) -> usize {
        self.digit_addrs.len()
    }

    /// `true` if the display is mounted upside down.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Interrupt a caller waiting for the display or for its controller.
    ///
    /// A shared controller is interrupted for all of its users, not only
    /// for this display.
    pub fn interrupt(&self) {
        self.state.interrupt();
        self.controller.interrupt();
    }

    /// Unbind and hand back the controller.
    pub fn release(self) -> C {
        self.controller
    }
}

/// Parse an on/off switch written as text: `"1..."` is on, `"0..."` is off.
pub fn parse_switch<E>(input: &str) -> Result<bool, Error<E>> {
    match input.as_bytes().first() {
        Some(b'1') => Ok(true),
        Some(b'0') => Ok(false),
        _ => Err(Error::InvalidArgument),
    }
}
