/// General errors the SDK might return.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum SdkError {
    #[error("Could not create runtime")]
    CouldNotCreateRuntime,
    #[error("The event loop has shut down")]
    EventLoopClosed,
}
