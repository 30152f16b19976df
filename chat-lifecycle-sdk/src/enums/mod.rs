pub mod app_phase;
pub mod build_environment;
pub mod event;
pub mod fetch_reason;
