use crate::enums::app_phase::AppPhase;
use crate::enums::fetch_reason::FetchReason;
use crate::errors::permission_error::PermissionError;
use crate::errors::push_error::PushError;
use crate::errors::store_error::StoreError;
use crate::models::device_token::DeviceToken;
use std::time::SystemTime;

/// Everything the event loop reacts to: OS callbacks, timers, identity changes and remote call completions.
#[derive(Debug)]
pub(crate) enum InternalEvent {
    RequestNotifications,
    PermissionResolved(Result<bool, PermissionError>),
    ReregistrationDue {
        attempt: u8,
    },

    DeviceTokenPollTick,
    DeviceTokenReceived(DeviceToken),
    DeviceRegistrationFailed(String),

    FetchMessagingToken(FetchReason),
    MessagingTokenFetched {
        reason: FetchReason,
        result: Result<String, PushError>,
    },

    MessagingTokenRefreshed(Option<String>),
    MessagingTokenPersisted {
        identity_id: String,
        result: Result<(), StoreError>,
    },

    IdentityChanged(Option<String>),
    PhaseChanged {
        phase: AppPhase,
        at: SystemTime,
    },

    VisibilityChanged {
        hidden: bool,
        at: SystemTime,
    },

    PresencePersisted {
        identity_id: String,
        online: bool,
        result: Result<(), StoreError>,
    },

    Shutdown,
}
