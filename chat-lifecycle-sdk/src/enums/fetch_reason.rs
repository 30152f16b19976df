use std::fmt;

/// What triggered a messaging token fetch. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FetchReason {
    DeviceTokenReceived,
    DeviceTokenPoll,
    IdentityChanged,
    Requested,
}

impl fmt::Display for FetchReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchReason::DeviceTokenReceived => write!(f, "device token received"),
            FetchReason::DeviceTokenPoll => write!(f, "device token poll"),
            FetchReason::IdentityChanged => write!(f, "identity changed"),
            FetchReason::Requested => write!(f, "requested"),
        }
    }
}
