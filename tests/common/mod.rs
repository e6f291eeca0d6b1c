//! Common test utilities and mock implementations

pub mod test_utils;

#[allow(unused_imports)]
pub use mock_bus::{MockBus, MockError, Operation};
#[allow(unused_imports)]
pub use test_utils::{
    assert_float_eq, create_initialized_driver, create_mock_driver,
    create_mock_driver_with_config, MockDelay,
};
