/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure, timeout, or a body that did not decode.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A payload was valid JSON but not the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single-record response carried no `data`.
    #[error("response carried no data")]
    MissingData,

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("configuration error: {0}")]
    Config(String),
}
