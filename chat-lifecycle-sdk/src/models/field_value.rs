use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single value merged into a profile document.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Timestamp(SystemTime),
    /// Replaced by the store with its own clock when the write is applied.
    ServerTimestamp,
}

impl FieldValue {
    pub fn as_timestamp(&self) -> Option<SystemTime> {
        match self {
            FieldValue::Timestamp(time) => Some(*time),
            _ => None,
        }
    }
}

/// Text and flags map to JSON strings and booleans, timestamps to epoch milliseconds and the server
/// timestamp to the `{".sv": "timestamp"}` placeholder document stores understand.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Flag(flag) => serializer.serialize_bool(*flag),
            FieldValue::Timestamp(time) => {
                let millis = time
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_millis() as u64)
                    .unwrap_or(0);

                serializer.serialize_u64(millis)
            }

            FieldValue::ServerTimestamp => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(".sv", "timestamp")?;
                map.end()
            }
        }
    }
}
