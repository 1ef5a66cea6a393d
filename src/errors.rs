use reqwest::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Input rejected locally before any request is made.
    Validation(String),
    /// The request could not be completed.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status; `detail` is the error body
    /// field when one could be parsed.
    Api {
        status: StatusCode,
        detail: Option<String>,
    },
    /// A 2xx response carried a body we could not decode.
    Decode(reqwest::Error),
    /// The request URL could not be built from the configured base.
    Url(String),
}

impl ClientError {
    /// Text shown to the user: the server-provided detail verbatim when
    /// present, otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            ClientError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_server_rejection(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(message) => write!(f, "validation error: {message}"),
            ClientError::Transport(err) => write!(f, "transport error: {err}"),
            ClientError::Api {
                status,
                detail: Some(detail),
            } => write!(f, "api error {status}: {detail}"),
            ClientError::Api {
                status,
                detail: None,
            } => write!(f, "api error {status}"),
            ClientError::Decode(err) => write!(f, "response decode error: {err}"),
            ClientError::Url(message) => write!(f, "invalid request url: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}
