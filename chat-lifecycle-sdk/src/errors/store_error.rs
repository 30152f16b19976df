/// Errors returned by a profile store.
#[derive(Debug, Clone, PartialEq, uniffi::Error, thiserror::Error)]
pub enum StoreError {
    #[error("Could not reach the profile store: {message}")]
    Unreachable { message: String },
    #[error("The profile store rejected the write with status {status}")]
    Rejected { status: u16 },
    #[error("Could not encode profile fields: {message}")]
    EncodingError { message: String },
    #[error("Profile store error: {message}")]
    Other { message: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for StoreError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Other {
            message: error.reason,
        }
    }
}
