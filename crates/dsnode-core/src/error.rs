//! Failure taxonomy for a chat request.
//!
//! Nothing here is ever surfaced to the workflow host as an error: the node
//! renders every variant through [`ChatError::diagnostic`] and returns the
//! prose as its output, so a failing call never breaks graph execution.

use std::path::PathBuf;

use thiserror::Error;

/// Why a chat request produced no model reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The credential is empty or still the placeholder.
    #[error("no valid API key configured in {}", config_path.display())]
    MissingCredential { config_path: PathBuf },

    /// The request did not complete within the client timeout.
    #[error("request to the chat API timed out")]
    Timeout,

    /// No response at all (DNS, refused connection, TLS handshake, ...).
    #[error("could not connect to the chat API: {0}")]
    Connection(String),

    /// HTTP 402.
    #[error("insufficient account balance (402)")]
    InsufficientBalance { body: String },

    /// HTTP 401.
    #[error("unauthorized (401)")]
    Unauthorized { body: String },

    /// HTTP 429.
    #[error("rate limited (429)")]
    RateLimited { body: String },

    /// HTTP 5xx.
    #[error("server error ({status})")]
    Server { status: u16, body: String },

    /// Any other non-200 status.
    #[error("request failed ({status})")]
    Http { status: u16, body: String },

    /// Anything else: client construction, malformed response body, ...
    #[error("{0}")]
    Unknown(String),
}

impl ChatError {
    /// Classify a non-200 HTTP status and its raw body.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            402 => ChatError::InsufficientBalance { body },
            401 => ChatError::Unauthorized { body },
            429 => ChatError::RateLimited { body },
            s if s >= 500 => ChatError::Server { status: s, body },
            s => ChatError::Http { status: s, body },
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::InsufficientBalance { .. } => Some(402),
            ChatError::Unauthorized { .. } => Some(401),
            ChatError::RateLimited { .. } => Some(429),
            ChatError::Server { status, .. } | ChatError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Multi-line operator-facing message returned in place of a reply.
    pub fn diagnostic(&self) -> String {
        match self {
            ChatError::MissingCredential { config_path } => format!(
                "Error: please set a valid DeepSeek API key in the config file.\n\
                 Config file path: {}\n\
                 Or enable test mode to verify the node without calling the API.",
                config_path.display()
            ),
            ChatError::Timeout => "Error: connection to the DeepSeek API timed out. \
                 Check your network connection or try again later."
                .to_string(),
            ChatError::Connection(_) => "Error: could not connect to the DeepSeek API. \
                 Check your network connection."
                .to_string(),
            ChatError::InsufficientBalance { body } => format!(
                "Error: insufficient balance on the DeepSeek API account.\n\n\
                 Possible causes:\n\
                 1. Your DeepSeek account balance is used up\n\
                 2. Your API key may not have a payment method bound\n\
                 3. Your account may have an outstanding bill\n\n\
                 How to fix:\n\
                 1. Log in to the DeepSeek platform and check your balance\n\
                 2. Top up your DeepSeek account\n\
                 3. Confirm your payment method is set up correctly\n\
                 4. Meanwhile, enable test mode to verify the node\n\n\
                 Raw error: {body}"
            ),
            ChatError::Unauthorized { body } => http_failure(
                401,
                Some("The API key is invalid or has expired. Check that your API key is correct."),
                body,
            ),
            ChatError::RateLimited { body } => http_failure(
                429,
                Some("Rate limit exceeded. Reduce the call frequency or wait a while before retrying."),
                body,
            ),
            ChatError::Server { status, body } => http_failure(
                *status,
                Some("DeepSeek server error. Please try again later."),
                body,
            ),
            ChatError::Http { status, body } => http_failure(*status, None, body),
            ChatError::Unknown(detail) => format!(
                "Error: unexpected problem while processing text: {detail}\n\
                 Try enabling test mode to verify the node."
            ),
        }
    }
}

fn http_failure(status: u16, hint: Option<&str>, body: &str) -> String {
    let mut msg = format!("Error: DeepSeek API request failed (status code: {status})\n\n");
    if let Some(hint) = hint {
        msg.push_str(hint);
        msg.push_str("\n\n");
    }
    msg.push_str("Raw error: ");
    msg.push_str(body);
    msg
}
