use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failures. The backend rejecting credentials is not one of
/// these; that shows up in the response bodies instead.
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the base URL was invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The request didn't make it to the server and back, or the response
    /// body wasn't the JSON we expected.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than a success (2xx.)
    #[error("the server responded with {0}")]
    Status(reqwest::StatusCode),

    /// We gave up waiting for a response.
    #[error("the server took too long to respond")]
    TimedOut,
}

impl Error {
    /// Did this request fail because it took too long?
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::TimedOut => true,
            Self::Http(err) => err.is_timeout(),
            Self::UrlParse(_) | Self::Status(_) => false,
        }
    }
}
