use crate::enums::event::Event;
use crate::enums::fetch_reason::FetchReason;
use crate::errors::permission_error::PermissionError;
use crate::errors::push_error::PushError;
use crate::errors::store_error::StoreError;
use crate::event_sink::EventSink;
use crate::identity_context::IdentityContext;
use crate::internal_event::InternalEvent;
use crate::models::config::Config;
use crate::models::device_token::DeviceToken;
use crate::models::field_value::FieldValue;
use crate::models::profile_fields::{MESSAGING_TOKEN, UPDATED_AT};
use crate::services::notification_registrar::NotificationRegistrar;
use crate::services::profile_store::ProfileStore;
use crate::services::push_service::PushService;
use crate::token_lifecycle::schedule::Schedule;
use log::{debug, error, info, trace, warn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Idle,
    Watching,
    Fired,
}

/// Gets a messaging token out of the push service and keeps it stored against whoever is signed in.
///
/// Device token callbacks and messaging token fetches arrive in any order, any number of times. The
/// latest of each wins and every fetch result is written as-is, so duplicate fetches cost a write but
/// never leave the store in a wrong state.
pub(crate) struct TokenLifecycleManager {
    config: Config,
    push: Arc<dyn PushService>,
    registrar: Arc<dyn NotificationRegistrar>,
    store: Arc<dyn ProfileStore>,
    identity: Arc<IdentityContext>,
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
    events: EventSink,
    schedule: Schedule,
    poll_state: PollState,
    device_token: Option<DeviceToken>,
    messaging_token: Option<String>,
}

impl TokenLifecycleManager {
    pub(crate) fn new(
        config: Config,
        push: Arc<dyn PushService>,
        registrar: Arc<dyn NotificationRegistrar>,
        store: Arc<dyn ProfileStore>,
        identity: Arc<IdentityContext>,
        internal_tx: mpsc::UnboundedSender<InternalEvent>,
        events: EventSink,
    ) -> Self {
        Self {
            config,
            push,
            registrar,
            store,
            identity,
            internal_tx,
            events,
            schedule: Schedule::default(),
            poll_state: PollState::Idle,
            device_token: None,
            messaging_token: None,
        }
    }

    pub(crate) fn request_notifications(&self) {
        let registrar = self.registrar.clone();
        let internal_tx = self.internal_tx.clone();

        tokio::spawn(async move {
            let result = registrar.request_permission().await;
            if internal_tx
                .send(InternalEvent::PermissionResolved(result))
                .is_err()
            {
                debug!("Event loop is gone, dropping permission result");
            }
        });
    }

    pub(crate) fn on_permission_resolved(&mut self, result: Result<bool, PermissionError>) {
        match result {
            Ok(true) => {
                info!("Notification permission granted");
                self.events.emit(Event::PermissionGranted);

                self.registrar.register_for_remote_notifications();
                self.schedule.start(&self.config, &self.internal_tx);
                self.poll_state = PollState::Watching;
            }

            Ok(false) => {
                warn!("Notification permission denied");
                self.events.emit(Event::PermissionDenied);
            }

            Err(error) => {
                error!("{error}");
                self.events.emit(Event::PermissionRequestFailed {
                    message: error.to_string(),
                });
            }
        }
    }

    pub(crate) fn on_reregistration_due(&self, attempt: u8) {
        debug!("Requesting remote notification registration again, attempt {attempt}");
        self.registrar.register_for_remote_notifications();
    }

    pub(crate) fn on_device_token_received(&mut self, token: DeviceToken) {
        let token_hex = token.to_hex();
        let environment = self.config.build_environment;
        info!("Received device token {token_hex} ({environment})");

        match self
            .push
            .submit_device_token(token.as_bytes().to_vec(), environment)
        {
            Ok(()) => self.events.emit(Event::DeviceTokenSubmitted {
                token_hex,
                environment,
            }),

            Err(error) => {
                warn!("{error}");
                self.events.emit(Event::DeviceTokenSubmissionFailed {
                    message: error.to_string(),
                });
            }
        }

        self.device_token = Some(token);
        self.fetch_messaging_token(FetchReason::DeviceTokenReceived);
    }

    pub(crate) fn on_device_registration_failed(&self, message: String) {
        warn!("Remote notification registration failed: {message}");
        self.events.emit(Event::DeviceRegistrationFailed { message });
    }

    pub(crate) fn on_device_token_poll_tick(&mut self) {
        if self.poll_state != PollState::Watching {
            return;
        }

        let Some(token) = self.push.last_known_device_token() else {
            trace!("Push service has no device token yet");
            return;
        };

        info!(
            "Push service reports device token {}",
            DeviceToken::new(token).to_hex()
        );

        self.poll_state = PollState::Fired;
        self.schedule.stop_poll();
        self.fetch_messaging_token(FetchReason::DeviceTokenPoll);
    }

    /// Fetches in the background. Concurrent fetches are fine, each result gets written.
    pub(crate) fn fetch_messaging_token(&self, reason: FetchReason) {
        debug!("Fetching messaging token ({reason})");
        let push = self.push.clone();
        let internal_tx = self.internal_tx.clone();

        tokio::spawn(async move {
            let result = push.fetch_messaging_token().await;
            if internal_tx
                .send(InternalEvent::MessagingTokenFetched { reason, result })
                .is_err()
            {
                debug!("Event loop is gone, dropping messaging token");
            }
        });
    }

    pub(crate) fn on_messaging_token_fetched(
        &mut self,
        reason: FetchReason,
        result: Result<String, PushError>,
    ) {
        match result {
            Ok(token) => {
                info!("Got messaging token ({reason})");
                self.cache_and_persist(token);
            }

            Err(error) => {
                let has_device_token = self.device_token.is_some();
                warn!("Could not fetch messaging token ({reason}, device token received: {has_device_token}): {error}");

                self.events.emit(Event::MessagingTokenFetchFailed {
                    reason,
                    message: error.to_string(),
                });
            }
        }
    }

    pub(crate) fn on_messaging_token_refreshed(&mut self, token: Option<String>) {
        match token {
            Some(token) => {
                info!("Messaging token refreshed");
                self.cache_and_persist(token);
            }

            None => debug!("Messaging token refresh without a token, ignoring"),
        }
    }

    pub(crate) fn on_identity_changed(&self, identity: Option<String>) {
        match &self.messaging_token {
            Some(token) => self.persist(identity, token.clone()),
            None => self.fetch_messaging_token(FetchReason::IdentityChanged),
        }
    }

    pub(crate) fn on_messaging_token_persisted(
        &self,
        identity_id: String,
        result: Result<(), StoreError>,
    ) {
        match result {
            Ok(()) => {
                info!("Stored messaging token for {identity_id}");
                self.events
                    .emit(Event::MessagingTokenPersisted { identity_id });
            }

            Err(error) => {
                error!("Could not store messaging token for {identity_id}: {error}");
                self.events.emit(Event::MessagingTokenPersistFailed {
                    identity_id,
                    message: error.to_string(),
                });
            }
        }
    }

    pub(crate) fn shutdown(&mut self) {
        self.schedule.cancel();
        self.poll_state = PollState::Idle;
    }

    fn cache_and_persist(&mut self, token: String) {
        self.messaging_token = Some(token.clone());
        self.persist(self.identity.current_identity(), token);
    }

    /// Without an identity the token just stays cached, the next identity change writes it.
    fn persist(&self, identity: Option<String>, token: String) {
        let Some(identity_id) = identity else {
            debug!("Nobody is signed in, deferring messaging token write");
            self.events.emit(Event::MessagingTokenDeferred);
            return;
        };

        let mut fields = HashMap::with_capacity(2);
        fields.insert(MESSAGING_TOKEN.to_string(), FieldValue::Text(token));
        fields.insert(UPDATED_AT.to_string(), FieldValue::ServerTimestamp);

        let store = self.store.clone();
        let internal_tx = self.internal_tx.clone();

        tokio::spawn(async move {
            trace!("Merging messaging token into profile of {identity_id}");
            let result = store.merge(identity_id.clone(), fields).await;
            if internal_tx
                .send(InternalEvent::MessagingTokenPersisted {
                    identity_id,
                    result,
                })
                .is_err()
            {
                debug!("Event loop is gone, dropping messaging token write result");
            }
        });
    }
}
