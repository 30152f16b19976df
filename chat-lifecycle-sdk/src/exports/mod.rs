pub mod build_client;
pub mod client;
