use crate::errors::sdk_error::SdkError;
use crate::exports::client::Client;
use crate::identity_context::IdentityContext;
use crate::models::config::Config;
use crate::services::notification_registrar::NotificationRegistrar;
use crate::services::profile_store::ProfileStore;
use crate::services::push_service::PushService;
use std::sync::Arc;

/// Builds a new Client instance with the default [Config].
#[uniffi::export]
pub fn build_client(
    push: Arc<dyn PushService>,
    store: Arc<dyn ProfileStore>,
    registrar: Arc<dyn NotificationRegistrar>,
) -> Result<Arc<Client>, SdkError> {
    let client = Client::new(
        Config::default(),
        IdentityContext::new(),
        push,
        store,
        registrar,
    )?;

    Ok(Arc::new(client))
}
