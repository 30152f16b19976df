use crate::errors::permission_error::PermissionError;

/// The OS notification permission and registration subsystem.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait NotificationRegistrar: Send + Sync {
    /// Shows the permission prompt if needed. Returns whether notifications are allowed.
    async fn request_permission(&self) -> Result<bool, PermissionError>;

    /// Asks the OS for a device token. The result comes back later through
    /// [device_token_received][crate::client::Client::device_token_received] or
    /// [device_registration_failed][crate::client::Client::device_registration_failed].
    fn register_for_remote_notifications(&self);
}
