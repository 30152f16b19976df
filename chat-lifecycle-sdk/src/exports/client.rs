use crate::enums::app_phase::AppPhase;
use crate::errors::sdk_error::SdkError;
use crate::event_handler::EventHandler;
use crate::identity_context::IdentityContext;
use crate::models::config::Config;
use crate::services::notification_registrar::NotificationRegistrar;
use crate::services::profile_store::ProfileStore;
use crate::services::push_service::PushService;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Foreign bindings version of [crate::client::Client]. Owns the runtime the event loop runs on.
#[derive(uniffi::Object)]
pub struct Client {
    inner: crate::client::Client,
    rt: Runtime,
}

#[uniffi::export]
impl Client {
    /// Creates the runtime and starts the event loop on it.
    #[uniffi::constructor]
    pub fn new(
        config: Config,
        identity: Arc<IdentityContext>,
        push: Arc<dyn PushService>,
        store: Arc<dyn ProfileStore>,
        registrar: Arc<dyn NotificationRegistrar>,
    ) -> Result<Self, SdkError> {
        let rt = Runtime::new().or(Err(SdkError::CouldNotCreateRuntime))?;
        let inner = {
            let _guard = rt.enter();
            crate::client::Client::new(config, identity, push, store, registrar)
        };

        Ok(Self { inner, rt })
    }

    /// Adds a new handler that implements the [EventHandler] trait.
    pub fn add_event_handler(&self, handler: Arc<dyn EventHandler>) {
        let _guard = self.rt.enter();
        self.inner.add_event_handler(handler)
    }

    pub fn event_queue_size(&self) -> u64 {
        self.inner.event_queue_size() as u64
    }

    /// The identity context sign-ins and sign-outs go through.
    pub fn identity(&self) -> Arc<IdentityContext> {
        self.inner.identity()
    }

    /// Asks for notification permission and starts the registration schedule once granted.
    pub fn request_notifications(&self) -> Result<(), SdkError> {
        self.inner.request_notifications()
    }

    /// Forward of the OS device token callback.
    pub fn device_token_received(&self, token: Vec<u8>) -> Result<(), SdkError> {
        self.inner.device_token_received(token)
    }

    /// Forward of the OS registration failure callback.
    pub fn device_registration_failed(&self, message: String) -> Result<(), SdkError> {
        self.inner.device_registration_failed(message)
    }

    /// Forward of the push service's token refresh callback.
    pub fn messaging_token_refreshed(&self, token: Option<String>) -> Result<(), SdkError> {
        self.inner.messaging_token_refreshed(token)
    }

    pub fn fetch_messaging_token(&self) -> Result<(), SdkError> {
        self.inner.fetch_messaging_token()
    }

    /// Forward of app lifecycle transitions.
    pub fn phase_changed(&self, phase: AppPhase) -> Result<(), SdkError> {
        self.inner.phase_changed(phase)
    }

    pub fn set_status_hidden(&self, hidden: bool) -> Result<(), SdkError> {
        self.inner.set_status_hidden(hidden)
    }

    pub fn shutdown(&self) -> Result<(), SdkError> {
        self.inner.shutdown()
    }
}
