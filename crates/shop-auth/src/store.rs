//! Session management.

use crate::{AuthError, Identity};

/// Registered identities plus the currently authenticated one.
///
/// Every operation is synchronous and purely in memory. The store also
/// remembers the error of the last failed operation so the entry views can
/// show it as a single dismissable message.
#[derive(Debug, Default)]
pub struct SessionStore {
    identities: Vec<Identity>,
    /// Index into `identities`; identities are never removed.
    session: Option<usize>,
    error: Option<AuthError>,
}

impl SessionStore {
    /// Create an empty store with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new identity.
    ///
    /// Fails with [`AuthError::MissingFields`] when any field is empty and
    /// with [`AuthError::EmailTaken`] when the email is already registered.
    /// Registration does not log the new identity in.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return self.fail(AuthError::MissingFields);
        }
        if self.is_registered(email) {
            tracing::info!(email, "registration rejected: email taken");
            return self.fail(AuthError::EmailTaken);
        }

        self.identities.push(Identity::new(name, email, password));
        self.error = None;
        tracing::info!(email, registered = self.identities.len(), "identity registered");
        Ok(())
    }

    /// Start a session for the identity matching `email` and `password`.
    ///
    /// Both fields are compared exactly. On failure the previous session,
    /// if any, is left untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Identity, AuthError> {
        let Some(index) = self.identities.iter().position(|i| i.matches(email, password)) else {
            tracing::info!(email, "login rejected");
            return self.fail(AuthError::InvalidCredentials);
        };

        self.session = Some(index);
        self.error = None;
        tracing::info!(email, "session started");
        Ok(&self.identities[index])
    }

    /// End the session and clear any error. Safe to call without a session.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current_user() {
            tracing::info!(email = identity.email(), "session ended");
        }
        self.session = None;
        self.error = None;
    }

    /// The authenticated identity, if any.
    pub fn current_user(&self) -> Option<&Identity> {
        self.session.and_then(|i| self.identities.get(i))
    }

    /// Check if a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Error recorded by the last failed operation.
    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    /// Clear the recorded error.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Check if `email` belongs to a registered identity.
    pub fn is_registered(&self, email: &str) -> bool {
        self.identities.iter().any(|i| i.email() == email)
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Check if nobody has registered yet.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    fn fail<T>(&mut self, error: AuthError) -> Result<T, AuthError> {
        self.error = Some(error.clone());
        Err(error)
    }
}
