pub mod http_profile_store;
