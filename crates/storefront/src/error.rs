//! Widget error type.
//!
//! Every fallible widget operation returns [`WidgetError`]. Catalog loads log
//! and swallow it; cart and checkout operations hand it back to the caller
//! without touching the page.

use shopfront_core::ProductId;
use thiserror::Error;

/// Errors raised while talking to the shop API or rendering fragments.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status where one was required.
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A cart amount does not fit in a decimal.
    #[error("Cart total overflowed at product {0}")]
    Overflow(ProductId),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;
