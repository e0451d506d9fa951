//! Packet error check (PEC) for LTC7871 SPI frames
//!
//! Every LTC7871 transaction is three bytes: a command byte holding the 7-bit
//! register address and the direction bit, a data byte and a PEC byte. The PEC
//! is a CRC-8 (x^8 + x^2 + x + 1) seeded with 0x41 and computed over the
//! command byte followed by the data byte.
//!
//! Two implementations are provided. [`pec`] is table driven (via the `crc`
//! crate) and is what the driver uses. [`pec_bitwise`] follows the shift
//! register drawn in the datasheet and exists as the reference the table is
//! checked against.
//!
//! # Example
//!
//! ```
//! use ltc7871::pec::{self, Direction};
//!
//! let command = pec::command_byte(0x01, Direction::Read);
//! assert_eq!(command, 0x03);
//! assert_eq!(pec::pec(command, 0x00), pec::pec_bitwise(command, 0x00));
//! ```

use crc::{Algorithm, Crc};

/// PEC seed, bits 0 and 6 set
pub const PEC_SEED: u8 = 0x41;

/// PEC generator polynomial x^8 + x^2 + x + 1 (the x^8 term is implicit)
pub const PEC_POLYNOMIAL: u8 = 0x07;

/// CRC parameters of the LTC7871 PEC
pub const PEC_ALGORITHM: Algorithm<u8> = Algorithm {
    width: 8,
    poly: PEC_POLYNOMIAL,
    init: PEC_SEED,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0x97,
    residue: 0x00,
};

const PEC_CRC: Crc<u8> = Crc::<u8>::new(&PEC_ALGORITHM);

/// Transfer direction, carried in bit 0 of the command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Host writes the data byte
    Write = 0,
    /// Device returns the data byte
    Read = 1,
}

/// Build the command byte for a register access
///
/// Only the low 7 bits of `address` are significant.
#[must_use]
pub const fn command_byte(address: u8, direction: Direction) -> u8 {
    ((address & 0x7F) << 1) | direction as u8
}

/// Compute the PEC over a command byte and a data byte
#[must_use]
pub fn pec(command: u8, data: u8) -> u8 {
    let mut digest = PEC_CRC.digest();
    digest.update(&[command]);
    digest.update(&[data]);
    digest.finalize()
}

/// Bit-serial PEC, as described in the LTC7871 datasheet
///
/// The 16 bits of `command:data` are shifted in MSB first. Each step feeds
/// `IN0 = DIN ^ PEC[7]` back into cells 0, 1 and 2.
#[must_use]
pub const fn pec_bitwise(command: u8, data: u8) -> u8 {
    let word = ((command as u16) << 8) | data as u16;
    let mut cells = PEC_SEED;
    let mut bit = 16;
    while bit > 0 {
        bit -= 1;
        let din = ((word >> bit) & 1) as u8;
        let in0 = din ^ (cells >> 7);
        cells = (cells << 1) ^ (in0 * 0b111);
    }
    cells
}

/// PEC of a complete frame built from a register address, direction and data byte
#[must_use]
pub fn frame_pec(address: u8, direction: Direction, data: u8) -> u8 {
    pec(command_byte(address, direction), data)
}

/// Check a received PEC
///
/// Returns `Ok(())` when `received` matches, otherwise the locally computed
/// value as `Err(expected)`.
///
/// # Errors
///
/// Returns the expected PEC when it differs from `received`.
pub fn verify(command: u8, data: u8, received: u8) -> Result<(), u8> {
    let expected = pec(command, data);
    if expected == received {
        Ok(())
    } else {
        Err(expected)
    }
}
