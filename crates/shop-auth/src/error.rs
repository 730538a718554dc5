//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
///
/// The display text is what the entry views show to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A required field was empty.
    #[error("Please fill all fields")]
    MissingFields,

    /// The email is already registered.
    #[error("Email is already registered")]
    EmailTaken,

    /// No identity matches the email and password.
    #[error("Invalid credentials. Please provide correct login details.")]
    InvalidCredentials,

    /// A fault outside the store's own rules.
    ///
    /// The in-memory store never raises this itself. It is the mapping for
    /// backends that can fail, and the entry views show it only as a
    /// generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an expected, user-facing failure as opposed to an
    /// internal fault.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, AuthError::Internal(_))
    }
}
