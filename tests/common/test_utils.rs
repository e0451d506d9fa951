//! Test utilities and helper functions

use crate::common::mock_spi::MockSpi;
use ltc7871::{Ltc7871Driver, PecPolicy, SpiInterface};

/// Driver type used throughout the tests
pub type MockDriver = Ltc7871Driver<SpiInterface<MockSpi>>;

/// Create a mock driver for testing
/// Returns (driver, spi) where spi is a clone that shares state with the driver
pub fn create_mock_driver() -> (MockDriver, MockSpi) {
    create_mock_driver_with_policy(PecPolicy::Report)
}

/// Create a mock driver whose interface uses the given PEC policy
pub fn create_mock_driver_with_policy(policy: PecPolicy) -> (MockDriver, MockSpi) {
    let spi = MockSpi::new();
    let spi_clone = spi.clone();
    let driver = Ltc7871Driver::new(SpiInterface::with_policy(spi, policy));
    (driver, spi_clone)
}
