use thiserror::Error;

/// Every failure the client can surface. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Não foi possível conectar ao servidor.")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Resposta inválida do servidor.")]
    Decode(String),
    #[error("{0}")]
    Validation(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
