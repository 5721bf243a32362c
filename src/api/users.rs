use super::{ApiClient, HttpRequest, StatusMessages, Transport, SESSION_EXPIRED};
use crate::error::ApiError;
use crate::models::User;
use crate::storage::KeyValueStore;

const MESSAGES: StatusMessages = StatusMessages::new(
    &[
        (401, SESSION_EXPIRED),
        (500, "Erro interno ao recuperar seus dados."),
    ],
    "Não foi possível carregar seu perfil.",
);

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// `GET /users/me` with an explicit token, used to validate a stored session.
    pub async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        let request = HttpRequest::get(self.url("/users/me")).bearer(token);
        self.execute(request, &MESSAGES).await
    }
}
