use crate::enums::build_environment::BuildEnvironment;
use crate::errors::push_error::PushError;

/// The remote push-delivery service, usually wrapped by a vendor SDK on the foreign side.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait PushService: Send + Sync {
    /// Hands a device token over for the given channel. Nothing is returned besides errors.
    fn submit_device_token(
        &self,
        token: Vec<u8>,
        environment: BuildEnvironment,
    ) -> Result<(), PushError>;

    /// Fetches the messaging token. Fails until a device token has been submitted.
    async fn fetch_messaging_token(&self) -> Result<String, PushError>;

    /// The last device token the service knows about, if any.
    fn last_known_device_token(&self) -> Option<Vec<u8>>;
}
