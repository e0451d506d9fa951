//! Value encodings used by the LTC7871 register map
//!
//! Most registers hold a plain byte. The three IDAC registers do not:
//!
//! - `MFR_IDAC_VLOW` and `MFR_IDAC_VHIGH` hold a 7-bit sign-magnitude value
//!   (bit 6 = sign, bits 0..=5 = magnitude).
//! - `MFR_IDAC_SETCUR` holds a 5-bit biased value. Bit 4 selects the band and
//!   bits 0..=3 carry the magnitude. The driver exposes it on a 0..=31 scale.
//!
//! All conversions live here so that each encode/decode pair can be checked
//! against the other in one place.

/// Sign bit of the IDAC_VLOW / IDAC_VHIGH fields
pub const SIGN_MAGNITUDE_SIGN: u8 = 0x40;

/// Magnitude mask of the IDAC_VLOW / IDAC_VHIGH fields
pub const SIGN_MAGNITUDE_MASK: u8 = 0x3F;

/// Largest magnitude representable in a sign-magnitude field
pub const SIGN_MAGNITUDE_MAX: i8 = 63;

/// Band bit of the IDAC_SETCUR field
pub const BIASED_BAND: u8 = 0x10;

/// Magnitude mask of the IDAC_SETCUR field
pub const BIASED_MASK: u8 = 0x0F;

/// Largest value accepted for the IDAC_SETCUR field
pub const BIASED_MAX: u8 = 31;

/// How a register's byte maps onto a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoding {
    /// Unsigned byte, used as-is
    Raw,
    /// 7-bit sign-magnitude (IDAC_VLOW, IDAC_VHIGH)
    SignMagnitude,
    /// 5-bit biased current setting (IDAC_SETCUR)
    BiasedCurrent,
}

impl Encoding {
    /// Decode a register byte into its value
    #[must_use]
    pub const fn decode(self, raw: u8) -> i16 {
        match self {
            Self::Raw => raw as i16,
            Self::SignMagnitude => decode_sign_magnitude(raw) as i16,
            Self::BiasedCurrent => decode_biased_current(raw) as i16,
        }
    }

    /// Encode a value into a register byte, clamping it to the legal range
    #[must_use]
    pub const fn encode(self, value: i16) -> u8 {
        match self {
            Self::Raw => clamp_i16(value, 0, u8::MAX as i16) as u8,
            Self::SignMagnitude => encode_sign_magnitude(clamp_i16(
                value,
                -(SIGN_MAGNITUDE_MAX as i16),
                SIGN_MAGNITUDE_MAX as i16,
            ) as i8),
            Self::BiasedCurrent => encode_biased_current(value),
        }
    }

    /// Range of values [`encode`](Self::encode) accepts without clamping
    #[must_use]
    pub const fn range(self) -> (i16, i16) {
        match self {
            Self::Raw => (0, u8::MAX as i16),
            Self::SignMagnitude => (-(SIGN_MAGNITUDE_MAX as i16), SIGN_MAGNITUDE_MAX as i16),
            Self::BiasedCurrent => (0, BIASED_MAX as i16),
        }
    }
}

const fn clamp_i16(value: i16, min: i16, max: i16) -> i16 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Decode a 7-bit sign-magnitude field
///
/// Bit 7 is ignored. A set sign bit with zero magnitude decodes to 0.
#[must_use]
pub const fn decode_sign_magnitude(raw: u8) -> i8 {
    let magnitude = (raw & SIGN_MAGNITUDE_MASK) as i8;
    if raw & SIGN_MAGNITUDE_SIGN != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Encode a value as a 7-bit sign-magnitude field
///
/// Values outside -63..=63 are clamped. Zero is always encoded with the sign
/// bit clear.
#[must_use]
pub const fn encode_sign_magnitude(value: i8) -> u8 {
    let clamped = if value < -SIGN_MAGNITUDE_MAX {
        -SIGN_MAGNITUDE_MAX
    } else if value > SIGN_MAGNITUDE_MAX {
        SIGN_MAGNITUDE_MAX
    } else {
        value
    };

    let magnitude = clamped.unsigned_abs() & SIGN_MAGNITUDE_MASK;
    if clamped < 0 {
        SIGN_MAGNITUDE_SIGN | magnitude
    } else {
        magnitude
    }
}

/// Decode the IDAC_SETCUR field onto the 0..=31 scale
///
/// With the band bit set the value is the magnitude (0..=15). With it clear
/// the magnitude is negated within the nibble and offset by 16 (16..=31).
/// Bits 5..=7 are ignored.
#[must_use]
pub const fn decode_biased_current(raw: u8) -> u8 {
    let magnitude = raw & BIASED_MASK;
    if raw & BIASED_BAND != 0 {
        magnitude
    } else {
        16 + ((!magnitude).wrapping_add(1) & BIASED_MASK)
    }
}

/// Encode a 0..=31 current setting as an IDAC_SETCUR field
///
/// Values outside 0..=31 are clamped first. Values of 16 and up are stored
/// as the nibble-wide two's complement with the band bit clear; values
/// below 16 are stored as-is with the band bit set.
#[must_use]
pub const fn encode_biased_current(value: i16) -> u8 {
    let clamped = clamp_i16(value, 0, BIASED_MAX as i16) as u8;
    if clamped >= 16 {
        (!clamped).wrapping_add(1) & BIASED_MASK
    } else {
        (clamped & BIASED_MASK) | BIASED_BAND
    }
}
