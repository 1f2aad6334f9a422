//! Success/failure result returned across the store boundary.

/// Result of a mutating store operation.
///
/// Stores never hand an [`crate::error::AppError`] to their consumers; they
/// convert it into `Failure` carrying a message fit for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(message) => Some(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Outcome::Success(data) => Ok(data),
            Outcome::Failure(message) => Err(message),
        }
    }
}
