use thiserror::Error;

/// Ways a single request to the alerts API can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// DNS failure, refused connection, timeout or an aborted transfer.
    #[error("{0}")]
    Network(String),

    #[error("HTTP status {code}")]
    HttpStatus { code: u16 },

    /// The response body was not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for RequestError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::HttpStatus { code },
            ureq::Error::Transport(transport) => Self::Network(transport.to_string()),
        }
    }
}
