use crate::enums::app_phase::AppPhase;
use crate::enums::event::Event;
use crate::enums::fetch_reason::FetchReason;
use crate::errors::sdk_error::SdkError;
use crate::event_handler::EventHandler;
use crate::event_loop::EventLoop;
use crate::event_sink::EventSink;
use crate::identity_context::IdentityContext;
use crate::internal_event::InternalEvent;
use crate::models::config::Config;
use crate::models::device_token::DeviceToken;
use crate::presence::synchronizer::PresenceSynchronizer;
use crate::services::notification_registrar::NotificationRegistrar;
use crate::services::profile_store::ProfileStore;
use crate::services::push_service::PushService;
use crate::token_lifecycle::manager::TokenLifecycleManager;
use log::{trace, warn};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;

/// Events beyond this many are dropped until a handler catches up.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Entry point of the SDK. The host app forwards OS callbacks to it and it takes care of storing the messaging token
/// and the user's presence.
pub struct Client {
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
    event_rx: async_channel::Receiver<Event>,
    identity: Arc<IdentityContext>,
}

impl Client {
    /// Starts the event loop. Must be called from within a tokio runtime.
    pub fn new(
        config: Config,
        identity: Arc<IdentityContext>,
        push: Arc<dyn PushService>,
        store: Arc<dyn ProfileStore>,
        registrar: Arc<dyn NotificationRegistrar>,
    ) -> Self {
        let (event_tx, event_rx) = async_channel::bounded::<Event>(EVENT_QUEUE_CAPACITY);
        let (internal_tx, internal_rx) = mpsc::unbounded_channel::<InternalEvent>();
        let events = EventSink::new(event_tx);

        let tokens = TokenLifecycleManager::new(
            config,
            push,
            registrar,
            store.clone(),
            identity.clone(),
            internal_tx.clone(),
            events.clone(),
        );

        let presence =
            PresenceSynchronizer::new(store, identity.clone(), internal_tx.clone(), events);

        tokio::spawn(EventLoop::new(tokens, presence, identity.clone(), internal_rx).run());
        Self::forward_identity_changes(&identity, internal_tx.clone());

        Self {
            internal_tx,
            event_rx,
            identity,
        }
    }

    fn forward_identity_changes(
        identity: &Arc<IdentityContext>,
        internal_tx: mpsc::UnboundedSender<InternalEvent>,
    ) {
        let mut identity_rx = identity.subscribe();
        let identity = identity.clone();

        tokio::spawn(async move {
            loop {
                let change = tokio::select! {
                    _ = internal_tx.closed() => break,
                    change = identity_rx.recv() => change,
                };

                let identity_id = match change {
                    Ok(identity_id) => identity_id,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Missed {skipped} identity changes, catching up with the current one");
                        identity.current_identity()
                    }

                    Err(RecvError::Closed) => break,
                };

                if internal_tx
                    .send(InternalEvent::IdentityChanged(identity_id))
                    .is_err()
                {
                    break;
                }
            }

            trace!("Stopped forwarding identity changes");
        });
    }

    fn post(&self, event: InternalEvent) -> Result<(), SdkError> {
        self.internal_tx
            .send(event)
            .or(Err(SdkError::EventLoopClosed))
    }

    /// The identity context this client reads from. Sign-ins and sign-outs go through it.
    pub fn identity(&self) -> Arc<IdentityContext> {
        self.identity.clone()
    }

    /// Adds a handler closure. If you're using this SDK with Rust, not through a foreign binding, then this is the preferred method of
    /// handling events.
    pub fn add_event_handler_closure<F>(&self, f: F)
    where
        F: Fn(Event) + Send + 'static,
    {
        let event_rx = self.event_rx.clone();
        tokio::spawn(async move {
            while let Ok(event) = event_rx.recv().await {
                f(event);
            }
        });
    }

    /// Adds a new handler that implements the [EventHandler] trait.
    ///
    /// This exists for the foreign language bindings, with which generics don't
    /// work. Prefer [`add_event_handler_closure`][Client::add_event_handler_closure] if using this SDK with Rust.
    pub fn add_event_handler(&self, handler: Arc<dyn EventHandler>) {
        let event_rx = self.event_rx.clone();
        tokio::spawn(async move {
            while let Ok(event) = event_rx.recv().await {
                handler.handle(event).await;
            }
        });
    }

    /// Number of events waiting for a handler.
    pub fn event_queue_size(&self) -> usize {
        self.event_rx.len()
    }

    /// Asks for notification permission. Once granted, registration is requested right away, twice more after the
    /// configured delays, and the push service's last known device token is polled until it shows up.
    pub fn request_notifications(&self) -> Result<(), SdkError> {
        self.post(InternalEvent::RequestNotifications)
    }

    /// OS callback with a freshly registered device token.
    pub fn device_token_received(&self, token: Vec<u8>) -> Result<(), SdkError> {
        self.post(InternalEvent::DeviceTokenReceived(DeviceToken::new(token)))
    }

    /// OS callback for a failed registration. Only reported, the registration schedule takes care of retrying.
    pub fn device_registration_failed(&self, message: String) -> Result<(), SdkError> {
        self.post(InternalEvent::DeviceRegistrationFailed(message))
    }

    /// Push service callback with a new messaging token. `None` is ignored.
    pub fn messaging_token_refreshed(&self, token: Option<String>) -> Result<(), SdkError> {
        self.post(InternalEvent::MessagingTokenRefreshed(token))
    }

    /// Fetches the messaging token and stores it for the signed in identity.
    pub fn fetch_messaging_token(&self) -> Result<(), SdkError> {
        self.post(InternalEvent::FetchMessagingToken(FetchReason::Requested))
    }

    /// App lifecycle callback.
    pub fn phase_changed(&self, phase: AppPhase) -> Result<(), SdkError> {
        self.post(InternalEvent::PhaseChanged {
            phase,
            at: SystemTime::now(),
        })
    }

    /// Sets the signed in user's "hide status" preference. Hidden users are never shown online.
    pub fn set_status_hidden(&self, hidden: bool) -> Result<(), SdkError> {
        self.post(InternalEvent::VisibilityChanged {
            hidden,
            at: SystemTime::now(),
        })
    }

    /// Stops the event loop and its timers. Writes already in flight still complete.
    pub fn shutdown(&self) -> Result<(), SdkError> {
        self.post(InternalEvent::Shutdown)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        let _ = self.internal_tx.send(InternalEvent::Shutdown);
    }
}
