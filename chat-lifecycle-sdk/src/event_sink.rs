use crate::enums::event::Event;
use async_channel::TrySendError;
use log::{error, trace};

/// Where reported failures and state transitions end up. Never blocks.
#[derive(Debug, Clone)]
pub(crate) struct EventSink {
    event_tx: async_channel::Sender<Event>,
}

impl EventSink {
    pub(crate) fn new(event_tx: async_channel::Sender<Event>) -> Self {
        Self { event_tx }
    }

    pub(crate) fn emit(&self, event: Event) {
        match self.event_tx.try_send(event) {
            Ok(()) => (),
            Err(TrySendError::Full(event)) => trace!("Event queue is full, dropping {event:?}"),
            Err(error) => error!("Could not send event to channel: {error}"),
        }
    }
}
