//! Unit tests for MFR_CHIP_CTRL handling: write protect, CML and reset

use crate::common::{Operation, create_mock_driver};

#[test]
fn test_write_protect_toggle() {
    let (mut driver, spi) = create_mock_driver();

    driver.set_write_protect(true).unwrap();
    assert!(driver.chip_ctrl().unwrap().write_protect);
    assert_eq!(spi.get_register(0x07), 0x01);

    driver.set_write_protect(false).unwrap();
    assert!(!driver.chip_ctrl().unwrap().write_protect);
    assert_eq!(spi.get_register(0x07), 0x00);
}

#[test]
fn test_write_protect_blocks_idac() {
    let (mut driver, spi) = create_mock_driver();

    driver.set_idac_vlow(10).unwrap();
    driver.set_write_protect(true).unwrap();
    driver.set_idac_vlow(20).unwrap();
    assert_eq!(driver.idac_vlow().unwrap(), 10);

    driver.set_write_protect(false).unwrap();
    driver.set_idac_vlow(20).unwrap();
    assert_eq!(driver.idac_vlow().unwrap(), 20);
    assert_eq!(spi.get_register(0x08), 20);
}

#[test]
fn test_clear_cml_preserves_write_protect() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(0x07, 0x05);
    spi.clear_operations();

    driver.clear_cml().unwrap();

    assert_eq!(
        spi.operations(),
        vec![
            Operation::Read {
                address: 0x07,
                value: 0x05
            },
            Operation::Write {
                address: 0x07,
                value: 0x05
            },
        ]
    );
    let ctrl = driver.chip_ctrl().unwrap();
    assert!(!ctrl.cml);
    assert!(ctrl.write_protect);
}

#[test]
fn test_clear_cml_without_write_protect() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(0x07, 0x04);

    driver.clear_cml().unwrap();

    assert_eq!(spi.frames().last(), Some(&vec![0x0E, 0x04, 0x84]));
    assert_eq!(spi.get_register(0x07), 0x00);
}

#[test]
fn test_reset_registers() {
    let (mut driver, spi) = create_mock_driver();
    driver.set_idac_vlow(-30).unwrap();
    driver.set_idac_vhigh(30).unwrap();
    driver.set_setcur(7).unwrap();
    assert_ne!(spi.get_register(0x08), 0);

    driver.reset_registers().unwrap();

    assert_eq!(driver.idac_vlow().unwrap(), 0);
    assert_eq!(driver.idac_vhigh().unwrap(), 0);
    assert_eq!(spi.get_register(0x0A), 0);
    // Reset is self-clearing
    assert!(!driver.chip_ctrl().unwrap().reset);
}

#[test]
fn test_reset_keeps_write_protect() {
    let (mut driver, spi) = create_mock_driver();
    driver.set_write_protect(true).unwrap();

    driver.reset_registers().unwrap();

    assert_eq!(spi.frames().last(), Some(&vec![0x0E, 0x03, 0x91]));
    assert!(driver.chip_ctrl().unwrap().write_protect);
}

#[test]
fn test_bad_write_pec_latches_cml() {
    use embedded_hal::spi::{Operation as SpiOperation, SpiDevice};

    let (mut driver, mut spi) = create_mock_driver();

    // Frame with a deliberately wrong PEC, sent straight to the bus
    let frame = [0x10, 0x05, 0x00];
    spi.transaction(&mut [SpiOperation::Write(&frame)]).unwrap();
    assert_eq!(
        spi.operations(),
        vec![Operation::PecRejected {
            address: 0x08,
            value: 0x05
        }]
    );
    assert_eq!(spi.get_register(0x08), 0x00);
    assert!(driver.chip_ctrl().unwrap().cml);

    driver.clear_cml().unwrap();
    assert!(!driver.chip_ctrl().unwrap().cml);
}
