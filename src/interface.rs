//! SPI bus interface for the LTC7871
//!
//! This module implements the `device-driver` register traits on top of an
//! `embedded-hal` [`SpiDevice`](embedded_hal::spi::SpiDevice). Every register
//! access is one SPI transaction:
//!
//! ```text
//! write: [A6..A0 0] [D7..D0] [PEC]            host -> chip
//! read:  [A6..A0 1]                           host -> chip
//!                   [D7..D0] [PEC]            chip -> host
//! ```
//!
//! The PEC of every read response is checked. What happens on a mismatch is
//! set by [`PecPolicy`].

use crate::Error;
use crate::pec::{self, Direction};
use device_driver::RegisterInterface;

/// Settling time after chip select falls and before it rises, for reads
pub const READ_SETTLE_NS: u32 = 5_000;

/// Settling time after chip select falls and before it rises, for writes
pub const WRITE_SETTLE_NS: u32 = 10_000;

/// What a read does when the received PEC does not match
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PecPolicy {
    /// Log a warning, count the mismatch and return the received byte anyway
    #[default]
    Report,
    /// Fail the read with [`Error::Pec`]
    Reject,
}

/// SPI interface for the LTC7871
///
/// # Note on Chip Select
///
/// Chip select is owned by the `SpiDevice` implementation. Each register
/// access is a single `transaction`, so chip select stays asserted for the
/// whole frame and shared buses stay locked for its duration.
///
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
    policy: PecPolicy,
    pec_mismatches: u32,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface that reports PEC mismatches without failing
    pub const fn new(spi: SPI) -> Self {
        Self::with_policy(spi, PecPolicy::Report)
    }

    /// Create a new SPI interface with an explicit PEC policy
    pub const fn with_policy(spi: SPI, policy: PecPolicy) -> Self {
        Self {
            spi,
            policy,
            pec_mismatches: 0,
        }
    }

    /// Current PEC policy
    pub const fn policy(&self) -> PecPolicy {
        self.policy
    }

    /// Change the PEC policy
    pub fn set_policy(&mut self, policy: PecPolicy) {
        self.policy = policy;
    }

    /// Number of read responses whose PEC did not match, since creation or the last reset
    pub const fn pec_mismatches(&self) -> u32 {
        self.pec_mismatches
    }

    /// Reset the PEC mismatch counter
    pub fn reset_pec_mismatches(&mut self) {
        self.pec_mismatches = 0;
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    fn check_response<E>(
        &mut self,
        address: u8,
        command: u8,
        data: u8,
        received: u8,
    ) -> Result<(), Error<E>> {
        let Err(expected) = pec::verify(command, data, received) else {
            return Ok(());
        };

        self.pec_mismatches = self.pec_mismatches.saturating_add(1);
        match self.policy {
            PecPolicy::Report => {
                log::warn!(
                    "PEC mismatch reading {address:#04x}: expected {expected:#04x}, received {received:#04x}, data {data:#04x}"
                );
                Ok(())
            }
            PecPolicy::Reject => Err(Error::Pec {
                address,
                expected,
                received,
            }),
        }
    }
}

fn write_frame(address: u8, data: u8) -> [u8; 3] {
    let command = pec::command_byte(address, Direction::Write);
    [command, data, pec::pec(command, data)]
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Every register is one byte wide
        // Multi-byte reads are issued one frame per register
        for (offset, byte) in (0u8..).zip(read_data.iter_mut()) {
            let address = address.wrapping_add(offset);
            let command = [pec::command_byte(address, Direction::Read)];
            let mut response = [0u8; 2];

            let mut operations = [
                embedded_hal::spi::Operation::DelayNs(READ_SETTLE_NS),
                embedded_hal::spi::Operation::Write(&command),
                embedded_hal::spi::Operation::Read(&mut response),
                embedded_hal::spi::Operation::DelayNs(READ_SETTLE_NS),
            ];
            self.spi.transaction(&mut operations).map_err(Error::Bus)?;

            let [data, received] = response;
            log::trace!("read {address:#04x} -> {data:#04x} (pec {received:#04x})");
            self.check_response::<E>(address, command[0], data, received)?;
            *byte = data;
        }
        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Every register is one byte wide
        for (offset, &data) in (0u8..).zip(write_data.iter()) {
            let address = address.wrapping_add(offset);
            let frame = write_frame(address, data);
            log::trace!("write {address:#04x} <- {data:#04x} (pec {:#04x})", frame[2]);

            let mut operations = [
                embedded_hal::spi::Operation::DelayNs(WRITE_SETTLE_NS),
                embedded_hal::spi::Operation::Write(&frame),
                embedded_hal::spi::Operation::DelayNs(WRITE_SETTLE_NS),
            ];
            self.spi.transaction(&mut operations).map_err(Error::Bus)?;
        }
        Ok(())
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = Error<E>;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Every register is one byte wide
        for (offset, byte) in (0u8..).zip(read_data.iter_mut()) {
            let address = address.wrapping_add(offset);
            let command = [pec::command_byte(address, Direction::Read)];
            let mut response = [0u8; 2];

            let mut operations = [
                embedded_hal_async::spi::Operation::DelayNs(READ_SETTLE_NS),
                embedded_hal_async::spi::Operation::Write(&command),
                embedded_hal_async::spi::Operation::Read(&mut response),
                embedded_hal_async::spi::Operation::DelayNs(READ_SETTLE_NS),
            ];
            self.spi
                .transaction(&mut operations)
                .await
                .map_err(Error::Bus)?;

            let [data, received] = response;
            log::trace!("read {address:#04x} -> {data:#04x} (pec {received:#04x})");
            self.check_response::<E>(address, command[0], data, received)?;
            *byte = data;
        }
        Ok(())
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Every register is one byte wide
        for (offset, &data) in (0u8..).zip(write_data.iter()) {
            let address = address.wrapping_add(offset);
            let frame = write_frame(address, data);
            log::trace!("write {address:#04x} <- {data:#04x} (pec {:#04x})", frame[2]);

            let mut operations = [
                embedded_hal_async::spi::Operation::DelayNs(WRITE_SETTLE_NS),
                embedded_hal_async::spi::Operation::Write(&frame),
                embedded_hal_async::spi::Operation::DelayNs(WRITE_SETTLE_NS),
            ];
            self.spi
                .transaction(&mut operations)
                .await
                .map_err(Error::Bus)?;
        }
        Ok(())
    }
}
