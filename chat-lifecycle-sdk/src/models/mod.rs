pub mod config;
pub mod device_token;
pub mod field_value;
pub(crate) mod presence_record;
pub mod profile_fields;
