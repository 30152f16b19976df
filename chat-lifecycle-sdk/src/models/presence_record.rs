use crate::models::field_value::FieldValue;
use crate::models::profile_fields::{LAST_ACTIVE_AT, ONLINE, UPDATED_AT};
use std::collections::HashMap;
use std::time::SystemTime;

/// What caused presence to be recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PresenceTrigger {
    Phase,
    Identity,
    Visibility,
}

/// Presence as it gets written to the profile store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PresenceRecord {
    pub(crate) online: bool,
    /// Only set when the user just stopped being active.
    pub(crate) last_active_at: Option<SystemTime>,
}

impl PresenceRecord {
    /// Returns the record to write, or `None` if the computed `online` value matches what was last written.
    pub(crate) fn plan(
        previous_online: bool,
        foregrounded: bool,
        hidden: bool,
        trigger: PresenceTrigger,
        at: SystemTime,
    ) -> Option<Self> {
        let online = foregrounded && !hidden;
        if online == previous_online {
            return None;
        }

        let went_inactive = previous_online && trigger == PresenceTrigger::Phase;
        Some(Self {
            online,
            last_active_at: went_inactive.then_some(at),
        })
    }

    pub(crate) fn fields(&self) -> HashMap<String, FieldValue> {
        let mut fields = HashMap::with_capacity(3);
        fields.insert(ONLINE.to_string(), FieldValue::Flag(self.online));
        fields.insert(UPDATED_AT.to_string(), FieldValue::ServerTimestamp);

        if let Some(last_active_at) = self.last_active_at {
            fields.insert(
                LAST_ACTIVE_AT.to_string(),
                FieldValue::Timestamp(last_active_at),
            );
        }

        fields
    }
}
