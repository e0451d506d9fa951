#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod encoding;
pub mod fault;
pub mod interface;
pub mod pec;
pub mod registers;
pub mod ssfm;
pub mod status;

use core::fmt;

// Re-export main types
pub use device::Ltc7871Driver;
pub use encoding::Encoding;
pub use fault::{ChannelFaults, Faults};
pub use interface::{PecPolicy, SpiInterface};
pub use ssfm::{FrequencySpread, ModulationFrequency, SpreadSpectrumConfig};
pub use status::{
    ChipCtrl, Config1, Config2, CurrentSenseThreshold, DrvccVoltage, PowerMode, Status,
};

/// Maximum SPI clock the driver is specified for (1 MHz)
pub const SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// SPI mode expected by the LTC7871: clock idle low, sample on rising edge, MSB first
pub const SPI_MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_0;

/// Register access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Status and configuration readback
    ReadOnly,
    /// Host-programmable register
    ReadWrite,
}

/// LTC7871 manufacturer registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Fault summary (RO)
    MfrFault = 0x01,
    /// Per-channel overcurrent faults (RO)
    MfrOcFault = 0x02,
    /// Per-channel negative overcurrent faults (RO)
    MfrNocFault = 0x03,
    /// Operation status (RO)
    MfrStatus = 0x04,
    /// Pin-strapped configuration: ILIM, DRVcc, SETCUR (RO)
    MfrConfig1 = 0x05,
    /// Pin-strapped configuration: mode flags (RO)
    MfrConfig2 = 0x06,
    /// Communication fault, reset and write protect (RW)
    MfrChipCtrl = 0x07,
    /// VLOW programming current, sign-magnitude (RW)
    MfrIdacVlow = 0x08,
    /// VHIGH programming current, sign-magnitude (RW)
    MfrIdacVhigh = 0x09,
    /// SETCUR pin sourcing current, biased (RW)
    MfrIdacSetcur = 0x0A,
    /// Spread spectrum modulation parameters (RW)
    MfrSsfm = 0x0B,
}

impl Register {
    /// Every register, in address order
    pub const ALL: [Self; 11] = [
        Self::MfrFault,
        Self::MfrOcFault,
        Self::MfrNocFault,
        Self::MfrStatus,
        Self::MfrConfig1,
        Self::MfrConfig2,
        Self::MfrChipCtrl,
        Self::MfrIdacVlow,
        Self::MfrIdacVhigh,
        Self::MfrIdacSetcur,
        Self::MfrSsfm,
    ];

    /// 7-bit register address
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Look up a register by address
    #[must_use]
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            0x01 => Some(Self::MfrFault),
            0x02 => Some(Self::MfrOcFault),
            0x03 => Some(Self::MfrNocFault),
            0x04 => Some(Self::MfrStatus),
            0x05 => Some(Self::MfrConfig1),
            0x06 => Some(Self::MfrConfig2),
            0x07 => Some(Self::MfrChipCtrl),
            0x08 => Some(Self::MfrIdacVlow),
            0x09 => Some(Self::MfrIdacVhigh),
            0x0A => Some(Self::MfrIdacSetcur),
            0x0B => Some(Self::MfrSsfm),
            _ => None,
        }
    }

    /// Whether the host may write this register
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::MfrFault
            | Self::MfrOcFault
            | Self::MfrNocFault
            | Self::MfrStatus
            | Self::MfrConfig1
            | Self::MfrConfig2 => Access::ReadOnly,
            Self::MfrChipCtrl
            | Self::MfrIdacVlow
            | Self::MfrIdacVhigh
            | Self::MfrIdacSetcur
            | Self::MfrSsfm => Access::ReadWrite,
        }
    }

    /// Returns true for read-write registers
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self.access(), Access::ReadWrite)
    }

    /// How the register byte maps onto a value
    #[must_use]
    pub const fn encoding(self) -> Encoding {
        match self {
            Self::MfrIdacVlow | Self::MfrIdacVhigh => Encoding::SignMagnitude,
            Self::MfrIdacSetcur => Encoding::BiasedCurrent,
            _ => Encoding::Raw,
        }
    }

    /// Datasheet name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MfrFault => "MFR_FAULT",
            Self::MfrOcFault => "MFR_OC_FAULT",
            Self::MfrNocFault => "MFR_NOC_FAULT",
            Self::MfrStatus => "MFR_STATUS",
            Self::MfrConfig1 => "MFR_CONFIG1",
            Self::MfrConfig2 => "MFR_CONFIG2",
            Self::MfrChipCtrl => "MFR_CHIP_CTRL",
            Self::MfrIdacVlow => "MFR_IDAC_VLOW",
            Self::MfrIdacVhigh => "MFR_IDAC_VHIGH",
            Self::MfrIdacSetcur => "MFR_IDAC_SETCUR",
            Self::MfrSsfm => "MFR_SSFM",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// PEC of a read response did not match (only with [`PecPolicy::Reject`])
    Pec {
        /// Register address that was read
        address: u8,
        /// PEC computed over the received command and data
        expected: u8,
        /// PEC sent by the device
        received: u8,
    },
    /// Write attempted on a read-only register
    ReadOnly(Register),
    /// Address outside the LTC7871 register map
    UnknownRegister(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(error) => write!(f, "bus error: {error:?}"),
            Self::Pec {
                address,
                expected,
                received,
            } => write!(
                f,
                "PEC mismatch reading {address:#04x}: expected {expected:#04x}, received {received:#04x}"
            ),
            Self::ReadOnly(register) => write!(f, "{register} is read-only"),
            Self::UnknownRegister(address) => write!(f, "no register at {address:#04x}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
