//! Controller error types.
//!
//! Every failure is caught at the controller boundary and surfaced as a
//! non-fatal value the view renders; nothing here crashes a view and
//! nothing is retried automatically.

use crate::validate::ValidationErrors;
use optica_client::ApiError;
use optica_prefs::PrefsError;
use thiserror::Error;

/// Errors surfaced by the storefront controllers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutating action was attempted without a session. No request was
    /// made; the view should prompt for login.
    #[error("login required")]
    AuthRequired,

    /// Client-side form validation failed. No request was made.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The API request failed or the server reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local persistence failed.
    #[error(transparent)]
    Prefs(#[from] PrefsError),
}

impl StoreError {
    /// Whether the failure calls for a login prompt.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, StoreError::AuthRequired)
    }

    /// The message to show the user, preferring what the server said.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Api(err) => err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
            other => other.to_string(),
        }
    }
}
