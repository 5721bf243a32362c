use serde::Serialize;

use super::{ApiClient, HttpRequest, StatusMessages, Transport, SESSION_EXPIRED};
use crate::error::ApiError;
use crate::models::Tag;
use crate::storage::KeyValueStore;

const STATUS: &[(u16, &str)] = &[(401, SESSION_EXPIRED), (500, "Erro interno ao carregar tags.")];

const LIST_MESSAGES: StatusMessages =
    StatusMessages::new(STATUS, "Não foi possível carregar tags.");
const CREATE_MESSAGES: StatusMessages = StatusMessages::new(STATUS, "Não foi possível criar a tag.");

#[derive(Serialize)]
struct NewTag<'a> {
    name: &'a str,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn fetch_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let request = HttpRequest::get(self.url("/tags")).bearer(self.stored_token());
        self.execute(request, &LIST_MESSAGES).await
    }

    pub async fn create_tag(&self, name: &str) -> Result<Tag, ApiError> {
        let request = HttpRequest::post(self.url("/tags"))
            .bearer(self.stored_token())
            .json(&NewTag { name })?;
        self.execute(request, &CREATE_MESSAGES).await
    }
}
