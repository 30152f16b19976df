use crate::enums::app_phase::AppPhase;
use crate::enums::event::Event;
use crate::errors::store_error::StoreError;
use crate::event_sink::EventSink;
use crate::identity_context::IdentityContext;
use crate::internal_event::InternalEvent;
use crate::models::presence_record::{PresenceRecord, PresenceTrigger};
use crate::services::profile_store::ProfileStore;
use log::{debug, error, info, trace};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;

/// Keeps the signed in identity's `online` flag in line with the app phase and the "hide status" preference.
///
/// Writes only happen when the computed value differs from the last one written for that identity, and always carry
/// the full state, so out of order completions still leave a complete record behind.
pub(crate) struct PresenceSynchronizer {
    store: Arc<dyn ProfileStore>,
    identity: Arc<IdentityContext>,
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
    events: EventSink,
    foregrounded: bool,
    hidden: HashMap<String, bool>,
    last_written: HashMap<String, bool>,
}

impl PresenceSynchronizer {
    pub(crate) fn new(
        store: Arc<dyn ProfileStore>,
        identity: Arc<IdentityContext>,
        internal_tx: mpsc::UnboundedSender<InternalEvent>,
        events: EventSink,
    ) -> Self {
        Self {
            store,
            identity,
            internal_tx,
            events,
            foregrounded: false,
            hidden: HashMap::new(),
            last_written: HashMap::new(),
        }
    }

    pub(crate) fn on_phase_changed(&mut self, phase: AppPhase, at: SystemTime) {
        debug!("App phase is now {phase:?}");
        self.foregrounded = phase.is_foreground();
        self.recompute(
            self.identity.current_identity(),
            PresenceTrigger::Phase,
            at,
        );
    }

    pub(crate) fn on_visibility_changed(&mut self, hidden: bool, at: SystemTime) {
        let Some(identity_id) = self.identity.current_identity() else {
            debug!("Nobody is signed in, ignoring status visibility change");
            return;
        };

        self.hidden.insert(identity_id.clone(), hidden);
        self.recompute(Some(identity_id), PresenceTrigger::Visibility, at);
    }

    pub(crate) fn on_identity_changed(&mut self, identity: Option<String>) {
        self.recompute(identity, PresenceTrigger::Identity, SystemTime::now());
    }

    pub(crate) fn on_presence_persisted(
        &self,
        identity_id: String,
        online: bool,
        result: Result<(), StoreError>,
    ) {
        match result {
            Ok(()) => {
                info!("Stored presence for {identity_id}, online: {online}");
                self.events.emit(Event::PresencePersisted {
                    identity_id,
                    online,
                });
            }

            Err(error) => {
                error!("Could not store presence for {identity_id}: {error}");
                self.events.emit(Event::PresencePersistFailed {
                    identity_id,
                    message: error.to_string(),
                });
            }
        }
    }

    fn recompute(&mut self, identity: Option<String>, trigger: PresenceTrigger, at: SystemTime) {
        let Some(identity_id) = identity else {
            trace!("Nobody is signed in, no presence to write");
            return;
        };

        let hidden = self.hidden.get(&identity_id).copied().unwrap_or(false);
        let previous_online = self
            .last_written
            .get(&identity_id)
            .copied()
            .unwrap_or(false);

        let Some(record) =
            PresenceRecord::plan(previous_online, self.foregrounded, hidden, trigger, at)
        else {
            trace!("Presence of {identity_id} unchanged ({trigger:?})");
            return;
        };

        self.last_written.insert(identity_id.clone(), record.online);

        let online = record.online;
        let fields = record.fields();
        let store = self.store.clone();
        let internal_tx = self.internal_tx.clone();

        tokio::spawn(async move {
            trace!("Merging presence into profile of {identity_id}");
            let result = store.merge(identity_id.clone(), fields).await;
            if internal_tx
                .send(InternalEvent::PresencePersisted {
                    identity_id,
                    online,
                    result,
                })
                .is_err()
            {
                debug!("Event loop is gone, dropping presence write result");
            }
        });
    }
}
