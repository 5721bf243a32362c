use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::error::ApiError;
use crate::storage::MemoryStore;

struct Reply {
    result: Result<HttpResponse, ApiError>,
    delay: usize,
}

/// Scripted transport: hands out replies in request order and records what was sent.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<VecDeque<Reply>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, result: Result<HttpResponse, ApiError>, delay: usize) {
        self.replies.borrow_mut().push_back(Reply { result, delay });
    }

    pub fn respond(&self, status: u16, body: &str) {
        let response = HttpResponse {
            status,
            body: body.to_string(),
        };
        self.push(Ok(response), 0);
    }

    pub fn respond_json(&self, status: u16, body: serde_json::Value) {
        self.respond(status, &body.to_string());
    }

    /// Like `respond_json`, but the reply resolves `delay` scheduler turns later
    /// than an undelayed one sent at the same time.
    pub fn respond_json_after(&self, delay: usize, status: u16, body: serde_json::Value) {
        let response = HttpResponse {
            status,
            body: body.to_string(),
        };
        self.push(Ok(response), delay);
    }

    pub fn fail(&self, err: ApiError) {
        self.push(Err(err), 0);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        // The reply belongs to this request, whichever request resolves first.
        let reply = self.replies.borrow_mut().pop_front();
        let Some(reply) = reply else {
            return Err(ApiError::Network("no scripted reply".to_string()));
        };
        for _ in 0..=reply.delay {
            tokio::task::yield_now().await;
        }
        reply.result
    }
}

pub fn test_client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport, MemoryStore) {
    let transport = MockTransport::new();
    let store = MemoryStore::new();
    let client = ApiClient::new("http://api.test", transport.clone(), store.clone());
    (client, transport, store)
}

pub fn user_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "googleSub": format!("sub-{id}"),
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn debt_json(id: i64, description: &str, amount_cents: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "ownerUserId": 1,
        "tagId": null,
        "type": "PAYABLE",
        "amountCents": amount_cents,
        "description": description,
        "dueDate": "2024-05-10T00:00:00.000Z",
        "paid": false,
        "paidAt": null,
        "createdAt": "2024-05-01T00:00:00.000Z",
        "updatedAt": "2024-05-01T00:00:00.000Z"
    })
}

pub fn page_json(data: Vec<serde_json::Value>, page: u32, limit: u32, total: u64) -> serde_json::Value {
    serde_json::json!({ "data": data, "page": page, "limit": limit, "total": total })
}
