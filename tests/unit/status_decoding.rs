//! Unit tests for decoding fault, status and configuration registers

use ltc7871::{
    ChannelFaults, ChipCtrl, Config1, Config2, CurrentSenseThreshold, DrvccVoltage, Faults,
    FrequencySpread, ModulationFrequency, PowerMode, SpreadSpectrumConfig, Status,
};
use test_case::test_case;

#[test]
fn test_fault_bits() {
    let faults = Faults::from_bits_truncate(0x05);
    assert!(faults.contains(Faults::OVER_TEMP));
    assert!(faults.contains(Faults::V5_UNDERVOLTAGE));
    assert!(!faults.contains(Faults::VREF_FAULT));
    assert_eq!(faults.to_string(), "Over Temp; V5 Undervoltage");
}

#[test]
fn test_fault_reserved_bit_ignored() {
    assert_eq!(Faults::from_bits_truncate(0x80), Faults::empty());
    assert_eq!(Faults::empty().to_string(), "none");
}

#[test]
fn test_voltage_faults() {
    assert!(Faults::VLOW_OVERVOLTAGE.has_voltage_fault());
    assert!(Faults::VHIGH_UNDERVOLTAGE.has_voltage_fault());
    assert!(!Faults::OVER_TEMP.has_voltage_fault());
}

#[test]
fn test_channel_faults() {
    let faults = ChannelFaults::from_bits_truncate(0x21);
    assert_eq!(faults.channels().collect::<Vec<_>>(), vec![1, 6]);
    assert!(faults.contains_channel(1));
    assert!(!faults.contains_channel(2));
    assert!(!faults.contains_channel(0));
    assert!(!faults.contains_channel(7));
    assert_eq!(faults.to_string(), "Channel 1; Channel 6");
}

#[test]
fn test_channel_lookup() {
    assert_eq!(ChannelFaults::channel(3), Some(ChannelFaults::CH3));
    assert_eq!(ChannelFaults::channel(0), None);
    assert_eq!(ChannelFaults::channel(7), None);
    // Bits 6 and 7 are not channels
    assert_eq!(ChannelFaults::from_bits_truncate(0xC0), ChannelFaults::empty());
}

#[test]
fn test_status_flags() {
    let status = Status::from_raw(0x05);
    assert!(status.power_good);
    assert!(!status.current_limit);
    assert!(status.soft_start_done);
    assert_eq!(
        status.to_string(),
        "Vlow/Vhigh within 10% regulation; Soft-start Finished"
    );
}

#[test_case(0, Some(CurrentSenseThreshold::Mv10))]
#[test_case(1, Some(CurrentSenseThreshold::Mv20))]
#[test_case(2, Some(CurrentSenseThreshold::Mv30))]
#[test_case(3, Some(CurrentSenseThreshold::Mv40))]
#[test_case(4, Some(CurrentSenseThreshold::Mv50))]
#[test_case(5, None)]
#[test_case(7, None)]
fn test_current_sense_threshold(code: u8, expected: Option<CurrentSenseThreshold>) {
    assert_eq!(Config1::from_raw(code).current_sense_threshold, expected);
}

#[test_case(0x00, Some(DrvccVoltage::V5))]
#[test_case(0x08, Some(DrvccVoltage::V8))]
#[test_case(0x10, Some(DrvccVoltage::V10))]
#[test_case(0x18, None)]
fn test_drvcc_voltage(raw: u8, expected: Option<DrvccVoltage>) {
    assert_eq!(Config1::from_raw(raw).drvcc_voltage, expected);
}

#[test]
fn test_config1_display() {
    let config = Config1::from_raw(0x2A);
    assert_eq!(
        config.current_sense_threshold,
        Some(CurrentSenseThreshold::Mv30)
    );
    assert_eq!(config.drvcc_voltage, Some(DrvccVoltage::V8));
    assert!(config.setcur_above_1v25);
    assert_eq!(
        config.to_string(),
        "Max Current Sense threshold is 30mV; DRVcc is 8V; SETCUR set above 1.25V"
    );
}

#[test]
fn test_config2_flags() {
    let config = Config2::from_raw(0x13);
    assert_eq!(config.mode, PowerMode::Buck);
    assert!(config.spread_spectrum);
    assert!(!config.hi_z);
    assert!(!config.dcm);
    assert!(config.burst);
    assert_eq!(
        config.to_string(),
        "In Buck mode; In Spread Spectrum mode; The controller is in burst mode operation"
    );
    assert_eq!(Config2::from_raw(0x00).mode, PowerMode::Boost);
}

#[test]
fn test_chip_ctrl() {
    let ctrl = ChipCtrl::from_raw(0x05);
    assert!(ctrl.write_protect);
    assert!(!ctrl.reset);
    assert!(ctrl.cml);
    assert!(!ChipCtrl::from_raw(0x02).write_protect);
    assert_eq!(
        ctrl.to_string(),
        "Write inhibited; PEC communication fault on write"
    );
    assert_eq!(ChipCtrl::from_raw(0x00).to_string(), "Write allowed");
}

#[test]
fn test_ssfm_decode() {
    let config = SpreadSpectrumConfig::from_raw(0x0A);
    assert_eq!(config.modulation, ModulationFrequency::Div2048);
    assert_eq!(config.spread, FrequencySpread::Percent15);
    assert_eq!(config.to_string(), "Sw. Freq / 2048; ±15%");
    // 111 is a second encoding of the default
    assert_eq!(
        SpreadSpectrumConfig::from_raw(0x07).modulation,
        ModulationFrequency::Div512
    );
}
