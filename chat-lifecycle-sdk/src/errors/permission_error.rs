/// Errors returned while asking the user for notification permission.
#[derive(Debug, Clone, PartialEq, uniffi::Error, thiserror::Error)]
pub enum PermissionError {
    #[error("Notification permission request failed: {message}")]
    RequestFailed { message: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for PermissionError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::RequestFailed {
            message: error.reason,
        }
    }
}
