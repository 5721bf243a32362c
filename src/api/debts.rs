use super::{ApiClient, HttpRequest, StatusMessages, Transport, SESSION_EXPIRED};
use crate::error::ApiError;
use crate::filters::DebtFilters;
use crate::models::{CreateDebtPayload, Debt, DebtPage};
use crate::storage::KeyValueStore;

const STATUS: &[(u16, &str)] = &[(401, SESSION_EXPIRED), (500, "Erro interno ao listar débitos.")];

const LIST_MESSAGES: StatusMessages =
    StatusMessages::new(STATUS, "Não foi possível carregar os débitos.");
const CREATE_MESSAGES: StatusMessages =
    StatusMessages::new(STATUS, "Não foi possível criar o débito.");

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn fetch_debts(&self, filters: &DebtFilters) -> Result<DebtPage, ApiError> {
        let url = format!("{}{}", self.url("/debts"), filters.to_query());
        let request = HttpRequest::get(url).bearer(self.stored_token());
        self.execute(request, &LIST_MESSAGES).await
    }

    pub async fn create_debt(&self, payload: &CreateDebtPayload) -> Result<Debt, ApiError> {
        let request = HttpRequest::post(self.url("/debts"))
            .bearer(self.stored_token())
            .json(payload)?;
        self.execute(request, &CREATE_MESSAGES).await
    }
}
