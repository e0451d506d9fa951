//! Register definitions for the LTC7871
//!
//! The LTC7871 exposes eleven 8-bit manufacturer registers at 0x01..=0x0B.
//! Registers 0x01..=0x06 are read-only on the chip; the host may only write
//! 0x07..=0x0B. Read-only enforcement for the raw API lives in
//! [`Register::access`](crate::Register::access).
//!
//! Every access goes through the [`SpiInterface`](crate::SpiInterface), which
//! frames it with the command byte and PEC.

device_driver::create_device!(
    device_name: Ltc7871,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// MFR_FAULT - Fault summary (0x01, RO)
        register MfrFault {
            const ADDRESS = 0x01;
            const SIZE_BITS = 8;

            /// Over-temperature
            over_temp: bool = 0,
            /// Reference fault
            vref_fault: bool = 1,
            /// V5 undervoltage
            vfive_uv: bool = 2,
            /// DRVcc undervoltage
            drvcc_uv: bool = 3,
            /// UVHIGH below 1.2V
            vhigh_uv: bool = 4,
            /// OVHIGH above 1.2V
            vhigh_ov: bool = 5,
            /// OVLOW above 1.2V
            vlow_ov: bool = 6,
        },

        /// MFR_OC_FAULT - Overcurrent per channel (0x02, RO)
        register MfrOcFault {
            const ADDRESS = 0x02;
            const SIZE_BITS = 8;

            /// Channel bitmap, bit n = channel n+1
            channels: uint = 0..6,
        },

        /// MFR_NOC_FAULT - Negative overcurrent per channel (0x03, RO)
        register MfrNocFault {
            const ADDRESS = 0x03;
            const SIZE_BITS = 8;

            /// Channel bitmap, bit n = channel n+1
            channels: uint = 0..6,
        },

        /// MFR_STATUS - Operation status (0x04, RO)
        register MfrStatus {
            const ADDRESS = 0x04;
            const SIZE_BITS = 8;

            /// VLOW/VHIGH within 10% of regulation
            pgood: bool = 0,
            /// Current limit reached
            ilim: bool = 1,
            /// Soft-start finished
            ss_done: bool = 2,
        },

        /// MFR_CONFIG1 - ILIM, DRVcc and SETCUR strapping (0x05, RO)
        register MfrConfigOne {
            const ADDRESS = 0x05;
            const SIZE_BITS = 8;

            /// Current-sense threshold selector (0=10mV .. 4=50mV)
            ilim_set: uint = 0..3,
            /// DRVcc selector (0=5V, 1=8V, 2=10V)
            drvcc_set: uint = 3..5,
            /// SETCUR pin above 1.25V
            setcur_high: bool = 5,
        },

        /// MFR_CONFIG2 - Mode strapping (0x06, RO)
        register MfrConfigTwo {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            /// Buck (1) or boost (0)
            buck: bool = 0,
            /// Spread spectrum
            spread_spectrum: bool = 1,
            /// Hi-Z mode
            hiz: bool = 2,
            /// Discontinuous conduction mode
            dcm: bool = 3,
            /// Burst mode
            burst: bool = 4,
        },

        /// MFR_CHIP_CTRL - Chip control (0x07, RW, default 0x00)
        register MfrChipCtrl {
            const ADDRESS = 0x07;
            const SIZE_BITS = 8;

            /// Write protect for the other R/W registers
            wp: bool = 0,
            /// Reset all R/W registers (self-clearing)
            reset: bool = 1,
            /// PEC fault on a write, write 1 to clear
            cml: bool = 2,
        },

        /// MFR_IDAC_VLOW - VLOW programming current (0x08, RW, default 0x00)
        register MfrIdacVlow {
            const ADDRESS = 0x08;
            const SIZE_BITS = 8;

            /// Sign-magnitude value, bit 6 = sign
            value: uint = 0..7,
        },

        /// MFR_IDAC_VHIGH - VHIGH programming current (0x09, RW, default 0x00)
        register MfrIdacVhigh {
            const ADDRESS = 0x09;
            const SIZE_BITS = 8;

            /// Sign-magnitude value, bit 6 = sign
            value: uint = 0..7,
        },

        /// MFR_IDAC_SETCUR - SETCUR sourcing current (0x0A, RW, default 0x00)
        register MfrIdacSetcur {
            const ADDRESS = 0x0A;
            const SIZE_BITS = 8;

            /// Biased value, bit 4 = band
            value: uint = 0..5,
        },

        /// MFR_SSFM - Spread spectrum modulation (0x0B, RW, default 0x00)
        register MfrSsfm {
            const ADDRESS = 0x0B;
            const SIZE_BITS = 8;

            /// Modulation signal frequency selector
            modulation: uint = 0..3,
            /// Frequency spread selector
            spread: uint = 3..5,
        },
    }
);
