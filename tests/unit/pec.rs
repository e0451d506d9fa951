//! Unit tests for PEC generation and checking

use ltc7871::pec::{self, Direction};
use test_case::test_case;

#[test_case(0x03, 0x00, 0x71 ; "read fault register")]
#[test_case(0x03, 0x05, 0x6A ; "read fault register with data")]
#[test_case(0x0E, 0x01, 0x9F ; "write protect on")]
#[test_case(0x0E, 0x00, 0x98 ; "write protect off")]
#[test_case(0x0E, 0x05, 0x83 ; "clear cml keeping write protect")]
#[test_case(0x16, 0x0A, 0x51 ; "write ssfm")]
#[test_case(0x10, 0x41, 0xD9 ; "write idac vlow minus one")]
#[test_case(0x11, 0xFF, 0xFF ; "all ones read of idac vlow")]
fn test_known_frames(command: u8, data: u8, expected: u8) {
    assert_eq!(pec::pec(command, data), expected);
    assert_eq!(pec::pec_bitwise(command, data), expected);
}

#[test]
fn test_table_matches_bitwise_for_every_frame() {
    for command in 0..=u8::MAX {
        for data in 0..=u8::MAX {
            assert_eq!(
                pec::pec(command, data),
                pec::pec_bitwise(command, data),
                "command {command:#04x} data {data:#04x}"
            );
        }
    }
}

#[test]
fn test_zero_response_never_valid() {
    // A floating-low MISO returns 0x00 0x00, which must fail the check for
    // every register
    for address in 0x01..=0x0B {
        let command = pec::command_byte(address, Direction::Read);
        assert_ne!(pec::pec(command, 0x00), 0x00, "address {address:#04x}");
        assert!(pec::verify(command, 0x00, 0x00).is_err());
    }
}

#[test]
fn test_all_ones_response() {
    // 0xFF 0xFF is a consistent frame only for IDAC_VLOW
    let valid: Vec<u8> = (0x01..=0x0B)
        .filter(|&address| {
            pec::verify(pec::command_byte(address, Direction::Read), 0xFF, 0xFF).is_ok()
        })
        .collect();
    assert_eq!(valid, vec![0x08]);
}

#[test]
fn test_single_bit_errors_detected() {
    let command = pec::command_byte(0x09, Direction::Write);
    let data = 0x25;
    let good = pec::pec(command, data);
    for bit in 0..8 {
        assert!(pec::verify(command ^ (1 << bit), data, good).is_err());
        assert!(pec::verify(command, data ^ (1 << bit), good).is_err());
        assert!(pec::verify(command, data, good ^ (1 << bit)).is_err());
    }
}

#[test]
fn test_verify_reports_expected() {
    assert_eq!(pec::verify(0x03, 0x05, 0x6A), Ok(()));
    assert_eq!(pec::verify(0x03, 0x05, 0x00), Err(0x6A));
}

#[test]
fn test_frame_pec_uses_command_byte() {
    assert_eq!(pec::frame_pec(0x07, Direction::Write, 0x01), 0x9F);
    assert_eq!(pec::frame_pec(0x01, Direction::Read, 0x00), 0x71);
    // Direction changes the PEC for the same address and data
    assert_ne!(
        pec::frame_pec(0x07, Direction::Write, 0x01),
        pec::frame_pec(0x07, Direction::Read, 0x01)
    );
}
