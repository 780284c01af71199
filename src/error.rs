use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Request to the content store failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Content store answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Content store error: {0}")]
    Store(String),
    #[error("Malformed content store response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum NotFoundError {
    #[error("Invalid blog post ID")]
    InvalidId,
    #[error("Blog post not found")]
    Missing(String),
    #[error("Failed to load blog post: {0}")]
    Unavailable(String),
}

/// Raised while deriving display values. Callers always recover with a fallback.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("Missing date")]
    MissingDate,
    #[error("Unable to parse date {0}")]
    InvalidDate(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Email service is not configured. Please contact the website administrator.")]
    NotConfigured,
    #[error("Sorry, there was an error sending your message. Please try again later.")]
    Delivery(String),
}
