use crate::enums::event::Event;

/// Receives [Event]s on the foreign side of the bindings. From Rust,
/// [add_event_handler_closure][crate::client::Client::add_event_handler_closure] is simpler.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: Event);
}
