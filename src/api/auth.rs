use serde::Serialize;

use super::{ApiClient, HttpRequest, StatusMessages, Transport};
use crate::error::ApiError;
use crate::models::AuthResponse;
use crate::storage::KeyValueStore;

const MESSAGES: StatusMessages = StatusMessages::new(
    &[
        (400, "Payload inválido"),
        (401, "Token Google inválido ou não autorizado"),
        (500, "Configuração ausente ou erro interno"),
    ],
    "Erro inesperado. Tente novamente.",
);

#[derive(Serialize)]
struct GoogleLogin<'a> {
    token: &'a str,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Exchanges an identity-provider credential for an API access token.
    pub async fn login_with_google(&self, credential: &str) -> Result<AuthResponse, ApiError> {
        let request =
            HttpRequest::post(self.url("/auth/google")).json(&GoogleLogin { token: credential })?;
        self.execute(request, &MESSAGES).await
    }
}
