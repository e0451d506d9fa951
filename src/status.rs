//! Status and configuration readback
//!
//! `MFR_STATUS`, `MFR_CONFIG1` and `MFR_CONFIG2` report how the controller is
//! running and how its pins were strapped. `MFR_CHIP_CTRL` holds the
//! communication fault, reset and write-protect bits.
//!
//! Multi-bit selectors (current-sense threshold, DRVcc voltage, buck/boost)
//! decode to enums. Codes the datasheet reserves decode to `None`.
//!
//! # Example
//!
//! ```
//! use ltc7871::status::{Config1, CurrentSenseThreshold, DrvccVoltage};
//!
//! let config = Config1::from_raw(0b0000_1011);
//! assert_eq!(config.current_sense_threshold, Some(CurrentSenseThreshold::Mv40));
//! assert_eq!(config.drvcc_voltage, Some(DrvccVoltage::V8));
//! ```

use core::fmt;

use crate::fault::write_list;

/// `MFR_STATUS` (0x04)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// VLOW/VHIGH within 10% of regulation
    pub power_good: bool,
    /// Current limit reached
    pub current_limit: bool,
    /// Soft-start finished
    pub soft_start_done: bool,
}

impl Status {
    /// Decode the register byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            power_good: raw & 0x01 != 0,
            current_limit: raw & 0x02 != 0,
            soft_start_done: raw & 0x04 != 0,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = [
            (self.power_good, "Vlow/Vhigh within 10% regulation"),
            (self.current_limit, "Ilim Reached"),
            (self.soft_start_done, "Soft-start Finished"),
        ];
        write_list(f, labels.iter().filter(|(set, _)| *set).map(|(_, label)| *label))
    }
}

/// Maximum current-sense threshold selected by the ILIM pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentSenseThreshold {
    /// 10 mV
    Mv10 = 0,
    /// 20 mV
    Mv20 = 1,
    /// 30 mV
    Mv30 = 2,
    /// 40 mV
    Mv40 = 3,
    /// 50 mV
    Mv50 = 4,
}

impl CurrentSenseThreshold {
    /// Decode the 3-bit selector, `None` for reserved codes 5..=7
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x07 {
            0 => Some(Self::Mv10),
            1 => Some(Self::Mv20),
            2 => Some(Self::Mv30),
            3 => Some(Self::Mv40),
            4 => Some(Self::Mv50),
            _ => None,
        }
    }

    /// Threshold in millivolts
    #[must_use]
    pub const fn millivolts(self) -> u8 {
        match self {
            Self::Mv10 => 10,
            Self::Mv20 => 20,
            Self::Mv30 => 30,
            Self::Mv40 => 40,
            Self::Mv50 => 50,
        }
    }
}

/// DRVcc gate-drive supply voltage selected by the DRVSET pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrvccVoltage {
    /// 5 V
    V5 = 0,
    /// 8 V
    V8 = 1,
    /// 10 V
    V10 = 2,
}

impl DrvccVoltage {
    /// Decode the 2-bit selector, `None` for the reserved code 3
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0 => Some(Self::V5),
            1 => Some(Self::V8),
            2 => Some(Self::V10),
            _ => None,
        }
    }

    /// Supply voltage in volts
    #[must_use]
    pub const fn volts(self) -> u8 {
        match self {
            Self::V5 => 5,
            Self::V8 => 8,
            Self::V10 => 10,
        }
    }
}

/// `MFR_CONFIG1` (0x05)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config1 {
    /// Bits 0..=2
    pub current_sense_threshold: Option<CurrentSenseThreshold>,
    /// Bits 3..=4
    pub drvcc_voltage: Option<DrvccVoltage>,
    /// SETCUR pin above 1.25V (bit 5)
    pub setcur_above_1v25: bool,
}

impl Config1 {
    /// Decode the register byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            current_sense_threshold: CurrentSenseThreshold::from_bits(raw),
            drvcc_voltage: DrvccVoltage::from_bits(raw >> 3),
            setcur_above_1v25: raw & 0x20 != 0,
        }
    }
}

impl fmt::Display for Config1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current_sense_threshold {
            Some(threshold) => write!(
                f,
                "Max Current Sense threshold is {}mV",
                threshold.millivolts()
            )?,
            None => f.write_str("Max Current Sense threshold reserved")?,
        }
        match self.drvcc_voltage {
            Some(voltage) => write!(f, "; DRVcc is {}V", voltage.volts())?,
            None => f.write_str("; DRVcc reserved")?,
        }
        if self.setcur_above_1v25 {
            f.write_str("; SETCUR set above 1.25V")?;
        }
        Ok(())
    }
}

/// Conversion direction reported by `MFR_CONFIG2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Bit 0 clear
    Boost,
    /// Bit 0 set
    Buck,
}

/// `MFR_CONFIG2` (0x06)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct Config2 {
    /// Buck or boost operation
    pub mode: PowerMode,
    /// Spread spectrum enabled
    pub spread_spectrum: bool,
    /// Hi-Z mode
    pub hi_z: bool,
    /// Discontinuous conduction mode
    pub dcm: bool,
    /// Burst mode operation
    pub burst: bool,
}

impl Config2 {
    /// Decode the register byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            mode: if raw & 0x01 != 0 {
                PowerMode::Buck
            } else {
                PowerMode::Boost
            },
            spread_spectrum: raw & 0x02 != 0,
            hi_z: raw & 0x04 != 0,
            dcm: raw & 0x08 != 0,
            burst: raw & 0x10 != 0,
        }
    }
}

impl fmt::Display for Config2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.mode {
            PowerMode::Buck => "In Buck mode",
            PowerMode::Boost => "In Boost mode",
        })?;
        let labels = [
            (self.spread_spectrum, "In Spread Spectrum mode"),
            (self.hi_z, "In Hi-Z mode"),
            (self.dcm, "The controller is in DCM"),
            (self.burst, "The controller is in burst mode operation"),
        ];
        for (_, label) in labels.iter().filter(|(set, _)| *set) {
            write!(f, "; {label}")?;
        }
        Ok(())
    }
}

/// `MFR_CHIP_CTRL` (0x07)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipCtrl {
    /// Writes to the other R/W registers are inhibited (bit 0)
    pub write_protect: bool,
    /// Reset all R/W registers (bit 1, self-clearing)
    pub reset: bool,
    /// A PEC error was detected on a write (bit 2, write 1 to clear)
    pub cml: bool,
}

impl ChipCtrl {
    const WP: u8 = 0x01;
    const RESET: u8 = 0x02;
    const CML: u8 = 0x04;

    /// Decode the register byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            write_protect: raw & Self::WP != 0,
            reset: raw & Self::RESET != 0,
            cml: raw & Self::CML != 0,
        }
    }
}

impl fmt::Display for ChipCtrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.write_protect {
            "Write inhibited"
        } else {
            "Write allowed"
        })?;
        if self.reset {
            f.write_str("; Reset all R/W registers")?;
        }
        if self.cml {
            f.write_str("; PEC communication fault on write")?;
        }
        Ok(())
    }
}
