//! In-memory stand-in for the remote document store, speaking the same REST dialect as
//! `chat_lifecycle_sdk::HttpProfileStore`.

mod mock_profile_store;

pub use mock_profile_store::MockProfileStore;
