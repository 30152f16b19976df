use crate::errors::store_error::StoreError;
use crate::models::field_value::FieldValue;
use std::collections::HashMap;

/// Remote document store holding one profile per identity.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Partial update. Fields not present in `fields` must be left as they are.
    async fn merge(
        &self,
        identity_id: String,
        fields: HashMap<String, FieldValue>,
    ) -> Result<(), StoreError>;
}
