//! Fault registers
//!
//! `MFR_FAULT`, `MFR_OC_FAULT` and `MFR_NOC_FAULT` are read-only summaries
//! where every bit is an independent condition. Several bits can be set at
//! once, so they decode to flag sets rather than a single cause.
//!
//! # Example
//!
//! ```
//! use ltc7871::fault::{ChannelFaults, Faults};
//!
//! let faults = Faults::from_bits_truncate(0b0000_0101);
//! assert_eq!(faults, Faults::OVER_TEMP | Faults::V5_UNDERVOLTAGE);
//!
//! let oc = ChannelFaults::from_bits_truncate(0b0010_0001);
//! assert!(oc.contains_channel(1) && oc.contains_channel(6));
//! ```

use core::fmt;

bitflags::bitflags! {
    /// `MFR_FAULT` (0x01) condition flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Faults: u8 {
        /// Die over-temperature
        const OVER_TEMP = 1 << 0;
        /// Internal reference fault
        const VREF_FAULT = 1 << 1;
        /// V5 supply undervoltage
        const V5_UNDERVOLTAGE = 1 << 2;
        /// DRVcc pin undervoltage
        const DRVCC_UNDERVOLTAGE = 1 << 3;
        /// UVHIGH pin below 1.2V
        const VHIGH_UNDERVOLTAGE = 1 << 4;
        /// OVHIGH pin above 1.2V
        const VHIGH_OVERVOLTAGE = 1 << 5;
        /// OVLOW pin above 1.2V
        const VLOW_OVERVOLTAGE = 1 << 6;
    }
}

impl Faults {
    /// Returns true if any supply or pin voltage fault is active
    #[must_use]
    pub const fn has_voltage_fault(&self) -> bool {
        self.intersects(
            Self::V5_UNDERVOLTAGE
                .union(Self::DRVCC_UNDERVOLTAGE)
                .union(Self::VHIGH_UNDERVOLTAGE)
                .union(Self::VHIGH_OVERVOLTAGE)
                .union(Self::VLOW_OVERVOLTAGE),
        )
    }

    const LABELS: [(Self, &'static str); 7] = [
        (Self::OVER_TEMP, "Over Temp"),
        (Self::VREF_FAULT, "Vref Fault"),
        (Self::V5_UNDERVOLTAGE, "V5 Undervoltage"),
        (Self::DRVCC_UNDERVOLTAGE, "DRVcc Pin Undervoltage"),
        (Self::VHIGH_UNDERVOLTAGE, "UVhigh < 1.2V"),
        (Self::VHIGH_OVERVOLTAGE, "OVhigh > 1.2V"),
        (Self::VLOW_OVERVOLTAGE, "OVlow > 1.2V"),
    ];
}

impl fmt::Display for Faults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(
            f,
            Self::LABELS
                .iter()
                .filter(|(flag, _)| self.contains(*flag))
                .map(|(_, label)| *label),
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Faults {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Faults({=u8:#04x})", self.bits());
    }
}

/// Number of power stages on the LTC7871
pub const CHANNEL_COUNT: u8 = 6;

bitflags::bitflags! {
    /// Per-channel flags of `MFR_OC_FAULT` (0x02) and `MFR_NOC_FAULT` (0x03)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelFaults: u8 {
        /// Channel 1
        const CH1 = 1 << 0;
        /// Channel 2
        const CH2 = 1 << 1;
        /// Channel 3
        const CH3 = 1 << 2;
        /// Channel 4
        const CH4 = 1 << 3;
        /// Channel 5
        const CH5 = 1 << 4;
        /// Channel 6
        const CH6 = 1 << 5;
    }
}

impl ChannelFaults {
    /// Flag for a 1-based channel number, `None` outside 1..=6
    #[must_use]
    pub const fn channel(number: u8) -> Option<Self> {
        if number >= 1 && number <= CHANNEL_COUNT {
            Some(Self::from_bits_retain(1 << (number - 1)))
        } else {
            None
        }
    }

    /// Returns true if the given 1-based channel is flagged
    #[must_use]
    pub const fn contains_channel(&self, number: u8) -> bool {
        match Self::channel(number) {
            Some(flag) => self.contains(flag),
            None => false,
        }
    }

    /// Iterate over the flagged 1-based channel numbers
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=CHANNEL_COUNT).filter(move |&number| self.contains_channel(number))
    }
}

impl fmt::Display for ChannelFaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (index, number) in self.channels().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "Channel {number}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelFaults {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ChannelFaults({=u8:#04x})", self.bits());
    }
}

/// Render labels as `a; b; c`, or `none` when there are no labels
pub(crate) fn write_list<'a>(
    f: &mut fmt::Formatter<'_>,
    labels: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    let mut empty = true;
    for label in labels {
        if !empty {
            f.write_str("; ")?;
        }
        f.write_str(label)?;
        empty = false;
    }
    if empty {
        f.write_str("none")?;
    }
    Ok(())
}
