pub mod permission_error;
pub mod push_error;
pub mod sdk_error;
pub mod store_error;
