//! Registered identities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A registered user record.
///
/// Created on registration and never mutated. The password is plaintext
/// and compared exactly; it is kept out of `Debug` output and out of the
/// serialized form.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    name: String,
    email: String,
    #[serde(skip)]
    password: String,
    registered_at: DateTime<Utc>,
}

impl Identity {
    /// Create an identity registered now.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            registered_at: Utc::now(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address, the identity's unique key.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// When the identity was registered.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Exact, case-sensitive match on both email and password.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("registered_at", &self.registered_at)
            .finish()
    }
}
