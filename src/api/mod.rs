//! REST client for the Ledgerly backend. Endpoint groups live in the submodules.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::storage::{KeyValueStore, TOKEN_KEY};

pub mod auth;
pub mod debts;
mod fetch;
pub mod tags;
pub mod users;

#[cfg(test)]
pub(crate) mod mock;

pub use fetch::FetchTransport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: String) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(url)
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body)
            .map_err(|err| ApiError::Validation(format!("payload inválido: {err}")))?;
        self.body = Some(raw);
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire. Only transport failures are errors here;
/// every HTTP status comes back as a response.
pub trait Transport {
    fn send(&self, request: HttpRequest)
        -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// Status code → message table for one endpoint group.
#[derive(Clone, Copy, Debug)]
pub struct StatusMessages {
    known: &'static [(u16, &'static str)],
    fallback: &'static str,
}

impl StatusMessages {
    pub const fn new(known: &'static [(u16, &'static str)], fallback: &'static str) -> Self {
        Self { known, fallback }
    }

    pub fn message_for(&self, status: u16) -> &'static str {
        self.known
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, message)| *message)
            .unwrap_or(self.fallback)
    }
}

pub(crate) const SESSION_EXPIRED: &str = "Sessão expirada ou não autorizada.";

pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    store: S,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, store: S) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stored bearer token, empty when signed out. The backend answers 401 to an
    /// empty token, which surfaces as the usual session-expired message.
    fn stored_token(&self) -> String {
        self.store.get(TOKEN_KEY).unwrap_or_default()
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
        messages: &StatusMessages,
    ) -> Result<R, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(?method, %url, "api request");

        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(?method, %url, error = ?err, "api transport failure");
            err
        })?;

        if !response.is_success() {
            let message = messages.message_for(response.status);
            tracing::warn!(?method, %url, status = response.status, "api request rejected");
            return Err(ApiError::Status {
                status: response.status,
                message: message.to_string(),
            });
        }

        serde_json::from_str(&response.body).map_err(|err| {
            tracing::warn!(?method, %url, error = %err, "api response did not match schema");
            ApiError::from(err)
        })
    }
}
