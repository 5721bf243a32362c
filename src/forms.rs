use chrono::NaiveDate;

use crate::api::{ApiClient, Transport};
use crate::error::ApiError;
use crate::models::{CreateDebtPayload, Debt, DebtType};
use crate::storage::KeyValueStore;

pub const MISSING_FIELDS: &str = "Preencha descrição, valor, vencimento e tag.";

/// Raw values of the "new debt" form, as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebtForm {
    pub description: String,
    /// Decimal amount, `12.50` or `12,50`.
    pub amount: String,
    /// `YYYY-MM-DD` from a date input.
    pub due_date: String,
    pub tag_id: String,
    pub kind: DebtType,
}

impl DebtForm {
    pub fn validate(&self) -> Result<CreateDebtPayload, ApiError> {
        let invalid = || ApiError::Validation(MISSING_FIELDS.to_string());

        let description = self.description.trim();
        if description.is_empty() {
            return Err(invalid());
        }
        let due_date = NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d")
            .map_err(|_| invalid())?;
        let tag_id = self.tag_id.trim().parse::<i64>().map_err(|_| invalid())?;
        let amount_cents = parse_cents(&self.amount).ok_or_else(invalid)?;

        Ok(CreateDebtPayload {
            tag_id,
            kind: self.kind,
            amount_cents,
            description: description.to_string(),
            due_date: format!("{}T00:00:00.000Z", due_date.format("%Y-%m-%d")),
            paid: None,
        })
    }

    /// Empties the fields after a successful create, keeping the selected type.
    pub fn reset(&mut self) {
        *self = Self {
            kind: self.kind,
            ..Self::default()
        };
    }
}

/// Validates `form` and creates the debt. Nothing is sent when validation fails.
pub async fn submit_debt<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    form: &DebtForm,
) -> Result<Debt, ApiError> {
    let payload = form.validate()?;
    let debt = api.create_debt(&payload).await?;
    tracing::info!(debt_id = debt.id, "debt created");
    Ok(debt)
}

/// Positive amount in cents, rounded to the nearest cent.
fn parse_cents(raw: &str) -> Option<u64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let cents = (value * 100.0).round();
    if cents <= 0.0 || cents > u64::MAX as f64 {
        return None;
    }
    Some(cents as u64)
}
