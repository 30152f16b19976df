//! Field names of the profile document both managers write into.

pub const MESSAGING_TOKEN: &str = "messagingToken";
pub const ONLINE: &str = "online";
pub const LAST_ACTIVE_AT: &str = "lastActiveAt";
pub const UPDATED_AT: &str = "updatedAt";
