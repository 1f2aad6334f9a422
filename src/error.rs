//! Error type shared by the API client, the services and the session storage.

use serde_json::Value;

/// Errors produced while talking to the DevLink API or handling local state.
///
/// `Validation` is raised before any network call. Every other variant comes
/// from the adapter or the session storage. Nothing in this crate treats an
/// `AppError` as fatal; services convert them into [`crate::domain::Outcome`]
/// values or log and move on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Non-2xx response. `message` is the server's `error` field when the body
    /// carried one.
    #[error("API responded with status {status}{}", message_suffix(.message))]
    Api {
        status: u16,
        message: Option<String>,
        body: Value,
    },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Invalid response body: {message}")]
    Decode { message: String },

    #[error("Session storage error: {message}")]
    Session { message: String },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Builds an `Api` error from a status code and the raw response body.
    ///
    /// The backend answers errors with `{"error": "..."}`; an `error` object
    /// with a `message` field is accepted as well. Bodies that are not JSON
    /// are kept as a JSON string.
    pub fn api(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str::<Value>(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));

        let message = match body.get("error") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Object(obj)) => obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            _ => None,
        };

        Self::Api {
            status,
            message,
            body,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Message suitable for showing to a user.
    ///
    /// Server-provided messages and local validation messages win; everything
    /// else collapses to `default`.
    pub fn display_message(&self, default: &str) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => default.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::decode(e.to_string())
        } else {
            Self::transport(e.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("Invalid {field}"),
                })
            })
            .collect();
        messages.sort();

        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::validation(messages.join("; "), details)
    }
}
