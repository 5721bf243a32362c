use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub google_sub: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtType {
    #[default]
    Payable,
    Receivable,
}

impl DebtType {
    pub fn as_str(self) -> &'static str {
        match self {
            DebtType::Payable => "PAYABLE",
            DebtType::Receivable => "RECEIVABLE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DebtType::Payable => "Pagar",
            DebtType::Receivable => "Receber",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: i64,
    pub owner_user_id: i64,
    pub tag_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: DebtType,
    pub amount_cents: u64,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tag: Option<Tag>,
}

/// One page of `GET /debts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebtPage {
    pub data: Vec<Debt>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDebtPayload {
    pub tag_id: i64,
    #[serde(rename = "type")]
    pub kind: DebtType,
    pub amount_cents: u64,
    pub description: String,
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_debt_with_embedded_tag() {
        let raw = r#"{
            "id": 3,
            "ownerUserId": 1,
            "tagId": 7,
            "type": "RECEIVABLE",
            "amountCents": 15990,
            "description": "Aluguel",
            "dueDate": "2024-05-10T00:00:00.000Z",
            "paid": false,
            "paidAt": null,
            "createdAt": "2024-05-01T12:00:00.000Z",
            "updatedAt": "2024-05-01T12:00:00.000Z",
            "tag": { "id": 7, "name": "Casa" }
        }"#;

        let debt: Debt = serde_json::from_str(raw).unwrap();
        assert_eq!(debt.kind, DebtType::Receivable);
        assert_eq!(debt.amount_cents, 15990);
        assert_eq!(debt.tag.as_ref().map(|t| t.name.as_str()), Some("Casa"));
        assert!(debt.tag.unwrap().color.is_none());
        assert!(debt.paid_at.is_none());
    }

    #[test]
    fn rejects_negative_amount() {
        let raw = r#"{
            "id": 3, "ownerUserId": 1, "tagId": null, "type": "PAYABLE",
            "amountCents": -5, "description": "x",
            "dueDate": "2024-05-10T00:00:00Z", "paid": false, "paidAt": null,
            "createdAt": "2024-05-01T12:00:00Z", "updatedAt": "2024-05-01T12:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Debt>(raw).is_err());
    }

    #[test]
    fn create_payload_omits_unset_paid() {
        let payload = CreateDebtPayload {
            tag_id: 2,
            kind: DebtType::Payable,
            amount_cents: 1000,
            description: "Luz".to_string(),
            due_date: "2024-06-01T00:00:00.000Z".to_string(),
            paid: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "tagId": 2,
                "type": "PAYABLE",
                "amountCents": 1000,
                "description": "Luz",
                "dueDate": "2024-06-01T00:00:00.000Z"
            })
        );
    }
}
