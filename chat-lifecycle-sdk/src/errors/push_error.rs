/// Errors returned by a push-delivery service.
#[derive(Debug, Clone, PartialEq, uniffi::Error, thiserror::Error)]
pub enum PushError {
    #[error("No device token has been registered yet")]
    DeviceTokenNotRegistered,
    #[error("The push service rejected the device token: {message}")]
    TokenRejected { message: String },
    #[error("Push service error: {message}")]
    ServiceError { message: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for PushError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::ServiceError {
            message: error.reason,
        }
    }
}
