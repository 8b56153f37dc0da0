use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceAlertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
}
