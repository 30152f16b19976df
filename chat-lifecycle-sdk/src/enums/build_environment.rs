use std::fmt;

/// Registration channel a device token is submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum BuildEnvironment {
    Sandbox,
    Production,
}

impl BuildEnvironment {
    /// Debug builds register against the sandbox channel, release builds against production.
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            BuildEnvironment::Sandbox
        } else {
            BuildEnvironment::Production
        }
    }
}

impl fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildEnvironment::Sandbox => write!(f, "sandbox"),
            BuildEnvironment::Production => write!(f, "production"),
        }
    }
}
