use crate::enums::build_environment::BuildEnvironment;
use std::time::Duration;

/// Settings for a [Client][crate::client::Client]. The defaults are what the mobile apps ship with.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Config {
    /// Channel every device token gets submitted to. Fixed for the lifetime of the client.
    pub build_environment: BuildEnvironment,
    /// Delay before the first extra registration request after permission was granted.
    pub first_reregistration_delay: Duration,
    /// Delay before the second, last extra registration request.
    pub second_reregistration_delay: Duration,
    /// How often the push service's last known device token is checked.
    pub device_token_poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_environment: BuildEnvironment::from_build(),
            first_reregistration_delay: Duration::from_secs(2),
            second_reregistration_delay: Duration::from_secs(5),
            device_token_poll_interval: Duration::from_secs(3),
        }
    }
}

/// Default settings, for the foreign bindings where [Default] isn't available.
#[uniffi::export]
pub fn default_config() -> Config {
    Config::default()
}
