use gloo_net::http::Request;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::ApiError;

/// Browser `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let sent = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(network)?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(network)?;

        let status = response.status();
        let body = response.text().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }
}
