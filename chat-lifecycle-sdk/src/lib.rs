//! Push token lifecycle and presence synchronization for a mobile chat client.
//!
//! The host app forwards OS callbacks (device token, registration failures, token refreshes, app phase changes) to a
//! [Client] and signs users in and out through an [IdentityContext]. The client keeps the push service's messaging
//! token and the user's presence stored in a [ProfileStore]. Failures never propagate, they are reported as [Event]s.
//! # Usage
//! ```no_run
//! use chat_lifecycle_sdk::{AppPhase, Client, Config, IdentityContext};
//! # use chat_lifecycle_sdk::{NotificationRegistrar, ProfileStore, PushService};
//! # use std::sync::Arc;
//! # async fn run(
//! #     push: Arc<dyn PushService>,
//! #     store: Arc<dyn ProfileStore>,
//! #     registrar: Arc<dyn NotificationRegistrar>,
//! # ) -> Result<(), chat_lifecycle_sdk::SdkError> {
//! let identity = IdentityContext::new();
//! let client = Client::new(Config::default(), identity.clone(), push, store, registrar);
//!
//! client.add_event_handler_closure(|event| { /* Handle events... */ });
//! client.request_notifications()?;
//!
//! identity.sign_in("alice".to_string());
//! client.phase_changed(AppPhase::Foreground)?;
//! # Ok(())
//! # }
//! ```
//! # Bindings
//! Bindings for Kotlin and Swift can be generated with
//! [UniFFI](https://mozilla.github.io/uniffi-rs/latest/tutorial/foreign_language_bindings.html#multi-crate-workspaces).
//!

pub mod client;
pub mod enums;
pub mod errors;
pub mod event_handler;
mod event_loop;
mod event_sink;
mod exports;
pub mod http;
pub mod identity_context;
mod internal_event;
pub mod models;
mod presence;
pub mod services;
mod token_lifecycle;

uniffi::setup_scaffolding!();

pub use client::Client;
pub use enums::app_phase::AppPhase;
pub use enums::build_environment::BuildEnvironment;
pub use enums::event::Event;
pub use enums::fetch_reason::FetchReason;
pub use errors::permission_error::PermissionError;
pub use errors::push_error::PushError;
pub use errors::sdk_error::SdkError;
pub use errors::store_error::StoreError;
pub use http::http_profile_store::HttpProfileStore;
pub use identity_context::IdentityContext;
pub use models::config::Config;
pub use models::field_value::FieldValue;
pub use services::notification_registrar::NotificationRegistrar;
pub use services::profile_store::ProfileStore;
pub use services::push_service::PushService;
