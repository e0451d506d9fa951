//! Integration tests for basic workflow scenarios

use crate::common::{Operation, create_mock_driver};
use ltc7871::{
    ChannelFaults, CurrentSenseThreshold, DrvccVoltage, Faults, FrequencySpread,
    ModulationFrequency, PowerMode, Register, SpreadSpectrumConfig,
};

#[test]
fn test_bring_up_and_monitor() {
    let (mut driver, spi) = create_mock_driver();

    // Pin-strapped configuration: 30mV ILIM, 10V DRVcc, buck with spread spectrum
    spi.set_register(0x05, 0x12);
    spi.set_register(0x06, 0x03);
    spi.set_register(0x04, 0x05);

    let config1 = driver.config1().unwrap();
    assert_eq!(
        config1.current_sense_threshold,
        Some(CurrentSenseThreshold::Mv30)
    );
    assert_eq!(config1.drvcc_voltage, Some(DrvccVoltage::V10));

    let config2 = driver.config2().unwrap();
    assert_eq!(config2.mode, PowerMode::Buck);
    assert!(config2.spread_spectrum);

    // Program the operating point, then lock it
    driver.set_idac_vlow(-12).unwrap();
    driver.set_idac_vhigh(8).unwrap();
    driver.set_setcur(20).unwrap();
    driver
        .configure_spread_spectrum(&SpreadSpectrumConfig {
            modulation: ModulationFrequency::Div1024,
            spread: FrequencySpread::Percent10,
        })
        .unwrap();
    driver.set_write_protect(true).unwrap();

    assert_eq!(spi.write_count(), 5);
    assert_eq!(driver.idac_vlow().unwrap(), -12);
    assert_eq!(driver.idac_vhigh().unwrap(), 8);
    assert_eq!(driver.setcur().unwrap(), 20);
    assert_eq!(spi.get_register(0x0B), 0x11);

    let status = driver.status().unwrap();
    assert!(status.power_good);
    assert!(status.soft_start_done);
    assert!(driver.faults().unwrap().is_empty());
    assert!(driver.oc_faults().unwrap().is_empty());
    assert_eq!(driver.interface().pec_mismatches(), 0);
}

#[test]
fn test_fault_scan() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(0x01, 0x41);
    spi.set_register(0x02, 0x06);
    spi.set_register(0x03, 0x20);

    let faults = driver.faults().unwrap();
    assert_eq!(faults, Faults::OVER_TEMP | Faults::VLOW_OVERVOLTAGE);
    assert!(faults.has_voltage_fault());

    let oc = driver.oc_faults().unwrap();
    assert_eq!(oc, ChannelFaults::CH2 | ChannelFaults::CH3);
    assert_eq!(oc.to_string(), "Channel 2; Channel 3");

    let noc = driver.noc_faults().unwrap();
    assert_eq!(noc.channels().collect::<Vec<_>>(), vec![6]);
}

#[test]
fn test_register_dump() {
    let (mut driver, spi) = create_mock_driver();
    for register in Register::ALL {
        spi.set_register(register.address(), register.address() * 3);
    }
    spi.clear_operations();

    let dump: Vec<(Register, u8)> = Register::ALL
        .into_iter()
        .map(|register| (register, driver.read_register(register).unwrap()))
        .collect();

    for (register, value) in dump {
        assert_eq!(value, register.address() * 3, "{register}");
    }
    assert!(
        spi.operations()
            .iter()
            .all(|op| matches!(op, Operation::Read { .. }))
    );
}

#[test]
fn test_error_recovery() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(0x0B, 0x03);

    spi.fail_next_read();
    assert!(driver.ssfm().is_err());

    // Modify reads first, so a read failure leaves the register untouched
    spi.fail_next_read();
    assert!(
        driver
            .set_frequency_spread(FrequencySpread::Percent8)
            .is_err()
    );
    assert_eq!(spi.get_register(0x0B), 0x03);

    driver
        .set_frequency_spread(FrequencySpread::Percent8)
        .unwrap();
    assert_eq!(spi.get_register(0x0B), 0x1B);
}

#[test]
fn test_release() {
    let (driver, spi) = create_mock_driver();
    let interface = driver.release();
    assert_eq!(interface.pec_mismatches(), 0);
    let _spi = interface.release();
    assert!(spi.frames().is_empty());
}
