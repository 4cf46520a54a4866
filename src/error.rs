use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Response has no `d` field: {0}")]
    MissingPayload(String),
    #[error("Response field `d` is empty: {0}")]
    EmptyPayload(String),
    #[error("Response field `d` is neither a string nor null: {0}")]
    UnexpectedPayload(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't build selector: {0}")]
    Selector(String),
    #[error("The landing page contains no <script> block")]
    NoScriptBlock,
    #[error("`{0}` is not a valid character code")]
    InvalidCharCode(String),
    #[error("Decoded private key is empty")]
    EmptyPrivateKey,
    #[error("Login returned an empty session id")]
    EmptySessionId,
}
