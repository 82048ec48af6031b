//! Session state: the current user and their bearer credential.

use crate::error::StoreError;
use crate::validate;
use optica_client::{AuthResponse, AuthToken, LoginRequest, RegisterRequest, StorefrontApi};
use optica_commerce::user::User;
use optica_prefs::{keys, LocalStore, PrefsError};

/// An established session: the user plus their credential.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user.
    pub user: User,
    /// Bearer credential for API requests.
    pub token: AuthToken,
}

/// Outcome of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthAccepted {
    /// The established user.
    pub user: User,
    /// Server's informational message, when it sent one.
    pub message: Option<String>,
}

/// Holds the optional current session and keeps it persisted.
///
/// Absence of a session is the anonymous state, not an error. The session
/// is hydrated from the local store at startup and written back whenever
/// it changes; logout clears both persisted keys.
#[derive(Debug, Default)]
pub struct SessionState {
    session: Option<Session>,
}

impl SessionState {
    /// Start anonymous.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild session state from the local store.
    ///
    /// A persisted user record that no longer deserializes is discarded
    /// rather than treated as fatal; the session simply starts anonymous.
    pub fn hydrate(prefs: &mut LocalStore) -> Result<Self, StoreError> {
        let token: Option<String> = prefs.get(keys::AUTH_TOKEN)?;
        let user = match prefs.get::<User>(keys::USER) {
            Ok(user) => user,
            Err(PrefsError::Serialize(err)) => {
                tracing::warn!(error = %err, "discarding corrupt persisted user record");
                prefs.remove(keys::USER)?;
                None
            }
            Err(err) => return Err(err.into()),
        };

        let session = match (token, user) {
            (Some(token), Some(user)) => Some(Session {
                user,
                token: AuthToken::new(token),
            }),
            _ => None,
        };

        Ok(Self { session })
    }

    /// Whether a session exists.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// The bearer credential, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        self.session.as_ref().map(|s| &s.token)
    }

    /// Log in. Validates the form first (no request is made when
    /// validation fails), then establishes and persists the session on a
    /// response carrying both a user and an access token.
    pub async fn login<A: StorefrontApi>(
        &mut self,
        api: &A,
        prefs: &mut LocalStore,
        email: &str,
        password: &str,
    ) -> Result<AuthAccepted, StoreError> {
        validate::login_form(email, password).map_err(StoreError::Validation)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = api.login(&request).await?;
        self.establish(prefs, response)
    }

    /// Register a new account. Same contract as [`login`](Self::login),
    /// with the registration validation rules.
    pub async fn register<A: StorefrontApi>(
        &mut self,
        api: &A,
        prefs: &mut LocalStore,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthAccepted, StoreError> {
        validate::registration_form(username, email, password).map_err(StoreError::Validation)?;

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = api.register(&request).await?;
        self.establish(prefs, response)
    }

    /// Log out: drop the session and clear the persisted keys.
    pub fn logout(&mut self, prefs: &mut LocalStore) -> Result<(), StoreError> {
        self.session = None;
        prefs.remove(keys::AUTH_TOKEN)?;
        prefs.remove(keys::USER)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    fn establish(
        &mut self,
        prefs: &mut LocalStore,
        response: AuthResponse,
    ) -> Result<AuthAccepted, StoreError> {
        match (response.user, response.access_token) {
            (Some(user), Some(token)) => {
                prefs.set(keys::AUTH_TOKEN, &token)?;
                prefs.set(keys::USER, &user)?;
                tracing::debug!(user = %user.id, "session established");
                self.session = Some(Session {
                    user: user.clone(),
                    token: AuthToken::new(token),
                });
                Ok(AuthAccepted {
                    user,
                    message: response.message,
                })
            }
            _ => {
                // The server can answer 2xx with an error envelope and no
                // token; the session must stay unchanged.
                let reason = response
                    .error
                    .or(response.message)
                    .unwrap_or_else(|| "Authentication failed".to_string());
                Err(StoreError::Api(optica_client::ApiError::Rejected(reason)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optica_commerce::ids::UserId;

    fn open_store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::open(dir.path().join("prefs.json")).unwrap()
    }

    #[test]
    fn test_hydrate_empty_store_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = open_store(&dir);
        let state = SessionState::hydrate(&mut prefs).unwrap();
        assert!(!state.is_authenticated());
        assert!(state.token().is_none());
    }

    #[test]
    fn test_hydrate_restores_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = open_store(&dir);
        prefs.set(keys::AUTH_TOKEN, &"tok".to_string()).unwrap();
        prefs
            .set(keys::USER, &User::new(UserId::new("u1"), "asha", "a@b.co"))
            .unwrap();

        let state = SessionState::hydrate(&mut prefs).unwrap();
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().username, "asha");
        assert_eq!(state.token().unwrap().as_str(), "tok");
    }

    #[test]
    fn test_hydrate_discards_corrupt_user_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = open_store(&dir);
        prefs.set(keys::AUTH_TOKEN, &"tok".to_string()).unwrap();
        prefs.set(keys::USER, &42u32).unwrap();

        let state = SessionState::hydrate(&mut prefs).unwrap();
        assert!(!state.is_authenticated());
        assert!(!prefs.exists(keys::USER));
    }

    #[test]
    fn test_token_without_user_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = open_store(&dir);
        prefs.set(keys::AUTH_TOKEN, &"tok".to_string()).unwrap();

        let state = SessionState::hydrate(&mut prefs).unwrap();
        assert!(!state.is_authenticated());
    }
}
