use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::dto::AuthResponse;
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::error::{is_unique_violation, ApiError};
use crate::state::AppState;

/// Display name given to auto-provisioned riders. There is no separate
/// registration flow; first login creates the account.
pub const DEMO_DISPLAY_NAME: &str = "Demo Rider";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Find-or-create login: an unseen email provisions a demo rider, a known
/// email must present the matching password. Returns a signed token whose
/// subject is the email and whose `displayName` claim is the stored
/// display name.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ApiError::Validation("email is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".into()));
    }

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(user) => {
            if !verify_password(password, &user.password_hash)? {
                warn!(email = %email, user_id = %user.id, "login invalid password");
                return Err(ApiError::Unauthorized);
            }
            user
        }
        None => provision_demo_user(state, &email, password).await?,
    };

    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(&user.email, &user.display_name)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse {
        token,
        display_name: user.display_name,
    })
}

/// Insert the demo rider for an unseen email. The store's uniqueness
/// constraint catches the check-then-insert race; losing it is a Conflict.
async fn provision_demo_user(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let hash = hash_password(password)?;
    match User::create(&state.db, email, &hash, DEMO_DISPLAY_NAME).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "demo user provisioned");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "duplicate email during provisioning");
            Err(ApiError::Conflict)
        }
        Err(e) => Err(ApiError::Storage(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("rider@example.com"));
        assert!(is_valid_email("a.b+c@mail.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[tokio::test]
    async fn login_rejects_empty_email() {
        let state = AppState::fake();
        let err = login(&state, "   ", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn login_rejects_malformed_email() {
        let state = AppState::fake();
        let err = login(&state, "not-an-email", "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn login_rejects_empty_password() {
        let state = AppState::fake();
        let err = login(&state, "rider@example.com", "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
