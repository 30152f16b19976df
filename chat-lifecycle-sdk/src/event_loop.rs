use crate::identity_context::IdentityContext;
use crate::internal_event::InternalEvent;
use crate::presence::synchronizer::PresenceSynchronizer;
use crate::token_lifecycle::manager::TokenLifecycleManager;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Serial context both managers run on. Handlers never await, remote calls run on their own tasks and come
/// back here as events, so no two handlers ever interleave.
pub(crate) struct EventLoop {
    tokens: TokenLifecycleManager,
    presence: PresenceSynchronizer,
    identity: Arc<IdentityContext>,
    internal_rx: mpsc::UnboundedReceiver<InternalEvent>,
}

impl EventLoop {
    pub(crate) fn new(
        tokens: TokenLifecycleManager,
        presence: PresenceSynchronizer,
        identity: Arc<IdentityContext>,
        internal_rx: mpsc::UnboundedReceiver<InternalEvent>,
    ) -> Self {
        Self {
            tokens,
            presence,
            identity,
            internal_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(event) = self.internal_rx.recv().await {
            match event {
                InternalEvent::RequestNotifications => self.tokens.request_notifications(),
                InternalEvent::PermissionResolved(result) => {
                    self.tokens.on_permission_resolved(result)
                }

                InternalEvent::ReregistrationDue { attempt } => {
                    self.tokens.on_reregistration_due(attempt)
                }

                InternalEvent::DeviceTokenPollTick => self.tokens.on_device_token_poll_tick(),
                InternalEvent::DeviceTokenReceived(token) => {
                    self.tokens.on_device_token_received(token)
                }

                InternalEvent::DeviceRegistrationFailed(message) => {
                    self.tokens.on_device_registration_failed(message)
                }

                InternalEvent::FetchMessagingToken(reason) => {
                    self.tokens.fetch_messaging_token(reason)
                }

                InternalEvent::MessagingTokenFetched { reason, result } => {
                    self.tokens.on_messaging_token_fetched(reason, result)
                }

                InternalEvent::MessagingTokenRefreshed(token) => {
                    self.tokens.on_messaging_token_refreshed(token)
                }

                InternalEvent::MessagingTokenPersisted {
                    identity_id,
                    result,
                } => self
                    .tokens
                    .on_messaging_token_persisted(identity_id, result),

                // A newer change is still queued behind this one and will be handled instead.
                InternalEvent::IdentityChanged(identity)
                    if identity != self.identity.current_identity() =>
                {
                    debug!("Skipping identity change that was already superseded");
                }

                InternalEvent::IdentityChanged(identity) => {
                    debug!("Identity changed");
                    self.tokens.on_identity_changed(identity.clone());
                    self.presence.on_identity_changed(identity);
                }

                InternalEvent::PhaseChanged { phase, at } => {
                    self.presence.on_phase_changed(phase, at)
                }

                InternalEvent::VisibilityChanged { hidden, at } => {
                    self.presence.on_visibility_changed(hidden, at)
                }

                InternalEvent::PresencePersisted {
                    identity_id,
                    online,
                    result,
                } => self
                    .presence
                    .on_presence_persisted(identity_id, online, result),

                InternalEvent::Shutdown => break,
            }
        }

        self.tokens.shutdown();
        info!("Event loop stopped");
    }
}
