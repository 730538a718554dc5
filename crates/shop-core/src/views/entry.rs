//! Registration and login forms.

use serde::Serialize;
use shop_auth::{validate_login, validate_registration, AuthError, Field, FormErrors, SessionStore};
use shop_router::Route;

/// Shown when the session store fails in a way the user can do nothing about.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Shown after a successful registration.
pub const REGISTERED: &str = "Registration successful! Redirecting...";

/// Shown after a successful login.
pub const LOGGED_IN: &str = "Login successful!";

/// Kind of form-level message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// A single form-level message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    fn success(text: &str) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.to_string(),
        }
    }

    fn error(err: &AuthError) -> Self {
        let text = if err.is_user_facing() {
            err.to_string()
        } else {
            UNEXPECTED_ERROR.to_string()
        };
        Self {
            kind: FlashKind::Error,
            text,
        }
    }

    /// Check if this reports success.
    pub fn is_success(&self) -> bool {
        self.kind == FlashKind::Success
    }
}

/// Result of submitting an entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; see the per-field errors. The store was not called.
    Invalid,
    /// The session store refused the request; see the flash message.
    Rejected(AuthError),
    /// The request succeeded; the form should redirect to `redirect`.
    Accepted { redirect: Route },
}

/// The registration form.
#[derive(Debug, Default)]
pub struct RegisterView {
    name: String,
    email: String,
    password: String,
    errors: FormErrors,
    flash: Option<Flash>,
    submitting: bool,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.errors.clear(Field::Name);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.clear(Field::Email);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.clear(Field::Password);
    }

    /// Set a field by name.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => self.set_name(value),
            Field::Email => self.set_email(value),
            Field::Password => self.set_password(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn dismiss_flash(&mut self) {
        self.flash = None;
    }

    /// Check if a successful submission is waiting for its redirect.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and register.
    ///
    /// On success the form stays in the submitting state until it is
    /// replaced by the redirect target.
    pub fn submit(&mut self, store: &mut SessionStore) -> SubmitOutcome {
        let errors = validate_registration(&self.name, &self.email, &self.password);
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "registration form invalid");
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.submitting = true;
        match store.register(&self.name, &self.email, &self.password) {
            Ok(()) => {
                self.flash = Some(Flash::success(REGISTERED));
                SubmitOutcome::Accepted {
                    redirect: Route::Login,
                }
            }
            Err(err) => {
                self.submitting = false;
                self.flash = Some(Flash::error(&err));
                SubmitOutcome::Rejected(err)
            }
        }
    }
}

/// The login form.
#[derive(Debug, Default)]
pub struct LoginView {
    email: String,
    password: String,
    errors: FormErrors,
    flash: Option<Flash>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.clear(Field::Email);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.clear(Field::Password);
    }

    /// Set a field by name. The login form has no name field, so
    /// [`Field::Name`] is ignored.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => {}
            Field::Email => self.set_email(value),
            Field::Password => self.set_password(value),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    pub fn dismiss_flash(&mut self) {
        self.flash = None;
    }

    /// Validate and log in.
    pub fn submit(&mut self, store: &mut SessionStore) -> SubmitOutcome {
        let errors = validate_login(&self.email, &self.password);
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "login form invalid");
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        match store.login(&self.email, &self.password) {
            Ok(_) => {
                self.flash = Some(Flash::success(LOGGED_IN));
                SubmitOutcome::Accepted {
                    redirect: Route::Home,
                }
            }
            Err(err) => {
                self.flash = Some(Flash::error(&err));
                SubmitOutcome::Rejected(err)
            }
        }
    }
}
