//! Bearer credential for the storefront API.

use serde::{Deserialize, Serialize};

/// An opaque bearer credential issued by the auth endpoints.
///
/// The client never inspects the token; it only stores it and attaches it
/// to requests. `Debug` redacts the value so the credential cannot leak
/// through logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

impl From<String> for AuthToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AuthToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
