//! Spread spectrum frequency modulation (`MFR_SSFM`, 0x0B)
//!
//! When spread spectrum is enabled by the MODE pin, the switching frequency
//! is swept by a triangle modulation signal. `MFR_SSFM` selects the
//! modulation signal frequency (bits 0..=2, as a divider of the switching
//! frequency) and the sweep amplitude (bits 3..=4).

use core::fmt;

/// Modulation signal frequency as a fraction of the switching frequency
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModulationFrequency {
    /// fsw / 64
    Div64,
    /// fsw / 128
    Div128,
    /// fsw / 256
    Div256,
    /// fsw / 512 (power-on default)
    #[default]
    Div512,
    /// fsw / 1024
    Div1024,
    /// fsw / 2048
    Div2048,
    /// fsw / 4096
    Div4096,
}

impl ModulationFrequency {
    /// Decode bits 0..=2. Codes 000 and 111 both select fsw / 512.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0b001 => Self::Div1024,
            0b010 => Self::Div2048,
            0b011 => Self::Div4096,
            0b100 => Self::Div256,
            0b101 => Self::Div128,
            0b110 => Self::Div64,
            _ => Self::Div512,
        }
    }

    /// Field code written to bits 0..=2
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Div512 => 0b000,
            Self::Div1024 => 0b001,
            Self::Div2048 => 0b010,
            Self::Div4096 => 0b011,
            Self::Div256 => 0b100,
            Self::Div128 => 0b101,
            Self::Div64 => 0b110,
        }
    }

    /// Divider applied to the switching frequency
    #[must_use]
    pub const fn divider(self) -> u16 {
        match self {
            Self::Div64 => 64,
            Self::Div128 => 128,
            Self::Div256 => 256,
            Self::Div512 => 512,
            Self::Div1024 => 1024,
            Self::Div2048 => 2048,
            Self::Div4096 => 4096,
        }
    }
}

/// Switching frequency sweep amplitude
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencySpread {
    /// ±12% (power-on default)
    #[default]
    Percent12 = 0b00,
    /// ±15%
    Percent15 = 0b01,
    /// ±10%
    Percent10 = 0b10,
    /// ±8%
    Percent8 = 0b11,
}

impl FrequencySpread {
    /// Decode bits 3..=4 (already shifted down)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::Percent12,
            0b01 => Self::Percent15,
            0b10 => Self::Percent10,
            _ => Self::Percent8,
        }
    }

    /// Field code, before shifting into bits 3..=4
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Sweep amplitude in percent of the switching frequency
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::Percent12 => 12,
            Self::Percent15 => 15,
            Self::Percent10 => 10,
            Self::Percent8 => 8,
        }
    }
}

/// Decoded `MFR_SSFM` contents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpreadSpectrumConfig {
    /// Bits 0..=2
    pub modulation: ModulationFrequency,
    /// Bits 3..=4
    pub spread: FrequencySpread,
}

impl SpreadSpectrumConfig {
    const SPREAD_SHIFT: u8 = 3;

    /// Decode the register byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            modulation: ModulationFrequency::from_bits(raw),
            spread: FrequencySpread::from_bits(raw >> Self::SPREAD_SHIFT),
        }
    }

    /// Encode into the register layout
    #[must_use]
    pub const fn to_raw(&self) -> u8 {
        self.modulation.bits() | (self.spread.bits() << Self::SPREAD_SHIFT)
    }
}

impl fmt::Display for SpreadSpectrumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sw. Freq / {}; ±{}%",
            self.modulation.divider(),
            self.spread.percent()
        )
    }
}
