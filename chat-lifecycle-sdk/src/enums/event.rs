use crate::enums::build_environment::BuildEnvironment;
use crate::enums::fetch_reason::FetchReason;

/// Token and presence events, mostly useful for diagnostics. None of the failures reported here are fatal.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum Event {
    /// The user allowed notifications.
    PermissionGranted,

    /// The user declined notifications. Not retried.
    PermissionDenied,

    /// The permission prompt itself failed.
    PermissionRequestFailed { message: String },

    /// A device token was handed to the push service.
    DeviceTokenSubmitted {
        token_hex: String,
        environment: BuildEnvironment,
    },

    /// The push service refused a device token.
    DeviceTokenSubmissionFailed { message: String },

    /// The OS could not register for remote notifications.
    DeviceRegistrationFailed { message: String },

    /// Fetching the messaging token failed. Expected until a device token has been submitted.
    MessagingTokenFetchFailed {
        reason: FetchReason,
        message: String,
    },

    /// The messaging token was stored against an identity.
    MessagingTokenPersisted { identity_id: String },

    /// A messaging token is cached but nobody is signed in yet.
    MessagingTokenDeferred,

    /// Storing the messaging token failed.
    MessagingTokenPersistFailed {
        identity_id: String,
        message: String,
    },

    /// A presence write went through.
    PresencePersisted { identity_id: String, online: bool },

    /// A presence write failed.
    PresencePersistFailed {
        identity_id: String,
        message: String,
    },
}
