//! Session layer: provider seam, auth client and screen-flow state machine
//!
//! The SDK never implements session storage or token refresh itself. It calls
//! the hosted session provider through [`SessionProvider`] and reacts to its
//! session-change notifications.

use crate::error::AuthError;
use crate::types::{AuthUser, Credentials, RegisterCredentials, SessionChange};
use crate::validation;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Trait for the hosted authentication/session service
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Signs an existing user in
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    /// Creates a new account and signs it in
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    /// Ends the active session
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Returns the currently signed-in user, if any
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;

    /// Subscribes to session-change notifications
    fn subscribe(&self) -> broadcast::Receiver<SessionChange>;
}

/// Auth client in front of a [`SessionProvider`]
///
/// Field validation happens here, before the provider is called; provider
/// errors pass through unmodified for the UI layer to display.
pub struct AuthClient {
    provider: Arc<dyn SessionProvider>,
}

impl AuthClient {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Signs in after checking the email shape
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        if !validation::is_valid_email(&credentials.email) {
            return Err(AuthError::InvalidCredentials(
                "malformed email address".to_string(),
            ));
        }

        tracing::debug!(email = %credentials.email, "Signing in");
        self.provider.sign_in(credentials).await
    }

    /// Registers after checking email shape, confirmation equality and the
    /// strict password policy
    pub async fn register(&self, credentials: &RegisterCredentials) -> Result<AuthUser, AuthError> {
        if !validation::is_valid_email(&credentials.email) {
            return Err(AuthError::InvalidCredentials(
                "malformed email address".to_string(),
            ));
        }
        if !validation::passwords_match(&credentials.password, &credentials.confirm_password) {
            return Err(AuthError::PasswordMismatch);
        }
        validation::validate_password(&credentials.password)
            .map_err(|issue| AuthError::WeakPassword(issue.message().to_string()))?;

        tracing::debug!(email = %credentials.email, "Signing up");
        self.provider
            .sign_up(&Credentials {
                email: credentials.email.clone(),
                password: credentials.password.clone(),
            })
            .await
    }

    /// Ends the active session
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }

    /// Returns the currently signed-in user, if any
    pub async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        self.provider.current_user().await
    }

    /// Subscribes to session-change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.provider.subscribe()
    }
}

/// Screen the app shell is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStage {
    /// Launch animation is playing
    Launching,
    /// Session lookup is in flight
    Loading,
    /// A user is signed in
    Authenticated(AuthUser),
    /// No session; login form shown
    AnonymousLogin,
    /// No session; register form shown
    AnonymousRegister,
}

/// Inputs driving [`AuthStage`] transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Launch animation completed
    LaunchFinished,
    /// Session-change notification, `None` meaning signed out
    SessionChanged(Option<AuthUser>),
    /// User tapped through to the register form
    ShowRegister,
    /// User tapped back to the login form
    ShowLogin,
}

impl AuthStage {
    /// Applies one event, returning the next stage
    ///
    /// Session lookup only starts once the launch animation has finished, so
    /// `Launching` reacts to nothing but `LaunchFinished`. The login/register
    /// toggle only applies in the anonymous stages; inapplicable events leave
    /// the stage unchanged.
    pub fn apply(self, event: AuthEvent) -> AuthStage {
        use AuthEvent::*;
        use AuthStage::*;

        match (self, event) {
            (Launching, LaunchFinished) => Loading,
            (Launching, _) => Launching,
            (_, SessionChanged(Some(user))) => Authenticated(user),
            (_, SessionChanged(None)) => AnonymousLogin,
            (AnonymousLogin, ShowRegister) => AnonymousRegister,
            (AnonymousRegister, ShowLogin) => AnonymousLogin,
            (stage, _) => stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    fn user(id: &str) -> AuthUser {
        AuthUser {
            id: id.into(),
            email: format!("{id}@example.com"),
            created_at: Utc::now(),
        }
    }

    /// Mock session provider recording calls
    struct MockSession {
        user: Mutex<Option<AuthUser>>,
        sign_up_calls: Mutex<usize>,
        changes: broadcast::Sender<SessionChange>,
    }

    impl MockSession {
        fn new() -> Self {
            let (changes, _) = broadcast::channel(8);
            Self {
                user: Mutex::new(None),
                sign_up_calls: Mutex::new(0),
                changes,
            }
        }

        fn sign_up_calls(&self) -> usize {
            *self.sign_up_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SessionProvider for MockSession {
        async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
            if credentials.password == "wrong" {
                return Err(AuthError::Provider("invalid login".to_string()));
            }
            let signed_in = user("user-1");
            *self.user.lock().unwrap() = Some(signed_in.clone());
            let _ = self.changes.send(SessionChange::SignedIn(signed_in.clone()));
            Ok(signed_in)
        }

        async fn sign_up(&self, _credentials: &Credentials) -> Result<AuthUser, AuthError> {
            *self.sign_up_calls.lock().unwrap() += 1;
            let signed_up = user("user-2");
            *self.user.lock().unwrap() = Some(signed_up.clone());
            Ok(signed_up)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            *self.user.lock().unwrap() = None;
            let _ = self.changes.send(SessionChange::SignedOut);
            Ok(())
        }

        async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.user.lock().unwrap().clone())
        }

        fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
            self.changes.subscribe()
        }
    }

    #[tokio::test]
    async fn login_rejects_malformed_email_before_provider() {
        let client = AuthClient::new(Arc::new(MockSession::new()));
        let err = client
            .login(&Credentials {
                email: "a@b".into(),
                password: "Abcdef1!".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn register_rejects_mismatched_confirmation() {
        let provider = Arc::new(MockSession::new());
        let client = AuthClient::new(provider.clone());

        let err = client
            .register(&RegisterCredentials {
                email: "a@b.com".into(),
                password: "Abcdef1!".into(),
                confirm_password: "Abcdef1?".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(provider.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let provider = Arc::new(MockSession::new());
        let client = AuthClient::new(provider.clone());

        let err = client
            .register(&RegisterCredentials {
                email: "a@b.com".into(),
                password: "abc".into(),
                confirm_password: "abc".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert_eq!(provider.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn register_passes_valid_credentials_through() {
        let provider = Arc::new(MockSession::new());
        let client = AuthClient::new(provider.clone());

        let signed_up = client
            .register(&RegisterCredentials {
                email: "a@b.com".into(),
                password: "Abcdef1!".into(),
                confirm_password: "Abcdef1!".into(),
            })
            .await
            .unwrap();

        assert_eq!(signed_up.id, "user-2");
        assert_eq!(provider.sign_up_calls(), 1);
    }

    #[tokio::test]
    async fn sign_in_notifies_subscribers() {
        let provider = Arc::new(MockSession::new());
        let client = AuthClient::new(provider.clone());
        let mut changes = client.subscribe();

        client
            .login(&Credentials {
                email: "a@b.com".into(),
                password: "Abcdef1!".into(),
            })
            .await
            .unwrap();

        match changes.recv().await.unwrap() {
            SessionChange::SignedIn(signed_in) => assert_eq!(signed_in.id, "user-1"),
            other => panic!("unexpected change: {other:?}"),
        }
    }

    #[test]
    fn launch_flow_reaches_login_when_signed_out() {
        let stage = AuthStage::Launching
            .apply(AuthEvent::LaunchFinished)
            .apply(AuthEvent::SessionChanged(None));
        assert_eq!(stage, AuthStage::AnonymousLogin);
    }

    #[test]
    fn launching_ignores_everything_but_launch_finished() {
        let stage = AuthStage::Launching.apply(AuthEvent::SessionChanged(Some(user("u"))));
        assert_eq!(stage, AuthStage::Launching);
    }

    #[test]
    fn session_change_drives_authenticated_from_any_later_stage() {
        for stage in [
            AuthStage::Loading,
            AuthStage::AnonymousLogin,
            AuthStage::AnonymousRegister,
        ] {
            let next = stage.apply(AuthEvent::SessionChanged(Some(user("u"))));
            assert!(matches!(next, AuthStage::Authenticated(_)));
        }
    }

    #[test]
    fn sign_out_returns_to_login() {
        let stage =
            AuthStage::Authenticated(user("u")).apply(AuthEvent::SessionChanged(None));
        assert_eq!(stage, AuthStage::AnonymousLogin);
    }

    #[test]
    fn login_register_toggle_only_applies_when_anonymous() {
        assert_eq!(
            AuthStage::AnonymousLogin.apply(AuthEvent::ShowRegister),
            AuthStage::AnonymousRegister
        );
        assert_eq!(
            AuthStage::AnonymousRegister.apply(AuthEvent::ShowLogin),
            AuthStage::AnonymousLogin
        );
        assert!(matches!(
            AuthStage::Authenticated(user("u")).apply(AuthEvent::ShowRegister),
            AuthStage::Authenticated(_)
        ));
        assert_eq!(AuthStage::Loading.apply(AuthEvent::ShowLogin), AuthStage::Loading);
    }
}
