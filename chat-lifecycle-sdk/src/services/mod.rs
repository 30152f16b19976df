pub mod notification_registrar;
pub mod profile_store;
pub mod push_service;
