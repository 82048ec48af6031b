//! Client-side credential form validation.
//!
//! These checks gate the auth requests: a form that fails them is never
//! submitted. The rules match what the backend enforces.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const SPECIAL_CHARS: &str = "@$!%*?&";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// The form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// Message to show next to the field.
    pub message: String,
}

/// All messages for one failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// The individual field messages.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for a given field, if that field failed.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Validate an email address. Returns the field message on failure.
pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        Some("Email is required".to_string())
    } else if !email_pattern().is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

/// Validate a password against the composition rules.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        Some("Password is required".to_string())
    } else if password.len() < 8 {
        Some("Password must be at least 8 characters".to_string())
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least one uppercase letter".to_string())
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number".to_string())
    } else if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        Some("Password must contain at least one special character".to_string())
    } else {
        None
    }
}

/// Validate a username. Only required for registration.
pub fn validate_username(username: &str) -> Option<String> {
    if username.is_empty() {
        Some("Username is required".to_string())
    } else if username.chars().count() < 3 {
        Some("Username must be at least 3 characters".to_string())
    } else {
        None
    }
}

/// Validate a login form.
pub fn login_form(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    push(&mut errors, Field::Email, validate_email(email));
    push(&mut errors, Field::Password, validate_password(password));
    finish(errors)
}

/// Validate a registration form.
pub fn registration_form(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    push(&mut errors, Field::Username, validate_username(username));
    push(&mut errors, Field::Email, validate_email(email));
    push(&mut errors, Field::Password, validate_password(password));
    finish(errors)
}

/// Password strength meter, 0-4: one point each for length, an uppercase
/// letter, a digit, and a non-alphanumeric character.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let mut strength = 0;
    if password.len() >= 8 {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 1;
    }
    strength
}

fn push(errors: &mut Vec<FieldError>, field: Field, message: Option<String>) {
    if let Some(message) = message {
        errors.push(FieldError { field, message });
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}
