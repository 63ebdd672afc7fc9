/// Failure to carry out a request. A response with a non-2xx status is
/// not an error at this level.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Connection, timeout or body read failure reported by reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Failure raised by executors that do not go through reqwest.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl Error {
    /// True when the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }
}
