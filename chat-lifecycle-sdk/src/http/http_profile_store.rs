use crate::errors::store_error::StoreError;
use crate::models::field_value::FieldValue;
use crate::services::profile_store::ProfileStore;
use log::trace;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::collections::HashMap;

/// [ProfileStore] backed by a REST document store. Profiles live at `{base_url}/users/{identity_id}.json` and are
/// merged with `PATCH`, which only touches the fields sent.
pub struct HttpProfileStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpProfileStore {
    pub fn new(base_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn document_url(&self, identity_id: &str) -> String {
        let mut url = format!(
            "{}/users/{}.json",
            self.base_url,
            urlencoding::encode(identity_id)
        );

        if let Some(auth_token) = &self.auth_token {
            url.push_str(format!("?auth={}", urlencoding::encode(auth_token)).as_str());
        }

        url
    }
}

#[async_trait::async_trait]
impl ProfileStore for HttpProfileStore {
    async fn merge(
        &self,
        identity_id: String,
        fields: HashMap<String, FieldValue>,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_vec(&fields).map_err(|error| StoreError::EncodingError {
            message: error.to_string(),
        })?;

        let url = self.document_url(&identity_id);
        trace!("C: PATCH {url}");

        let response = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(|error| StoreError::Unreachable {
                message: error.to_string(),
            })?;

        let status = response.status();
        trace!("S: {status}");

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}
