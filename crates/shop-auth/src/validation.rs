//! Entry-form validation.
//!
//! Validation runs before the session store is called and reports
//! problems per field, so each message can be shown next to its input.

use std::collections::BTreeMap;
use std::fmt;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    /// Field label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FormErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any previous one.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field, message);
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Forget the message for `field`; done whenever the field is edited.
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Check if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }
}

/// Validate the registration form.
pub fn validate_registration(name: &str, email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::new();

    let name = name.trim();
    if name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        errors.insert(Field::Name, "Name must only contain letters and spaces");
    }

    check_email(&mut errors, email);

    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, "Password must be at least 8 characters");
    }

    errors
}

/// Validate the login form.
pub fn validate_login(email: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::new();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.insert(Field::Password, "Password is required");
    }
    errors
}

fn check_email(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_well_formed_email(email) {
        errors.insert(Field::Email, "Invalid email format");
    }
}

/// Check the `local@domain.tld` shape: no whitespace, a non-empty part
/// before the `@`, and a `.` after it with characters on both sides.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    // The dot may sit anywhere after the first domain character, including
    // inside a later `@`-separated part.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
