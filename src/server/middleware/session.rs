//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods
//! relevant to its concern:
//! - `AuthSession` - The logged in Discord user (ID and display name)
//! - `CsrfSession` - CSRF token for the OAuth2 login flow

use tower_sessions::Session;

use crate::server::{error::AppError, model::user::User, util::parse::parse_u64_from_string};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_USER_NAME: &str = "auth:user_name";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
///
/// Stores the authenticated user's Discord ID and name. Users aren't persisted, so
/// the session is the only record of who is logged in.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the logged in user in the session.
    ///
    /// # Returns
    /// - `Ok(())` - User successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user(&self, user: &User) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user.discord_id.to_string())
            .await?;
        self.session
            .insert(SESSION_AUTH_USER_NAME, user.name.clone())
            .await?;
        Ok(())
    }

    /// Retrieves the logged in user from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - User is logged in
    /// - `Ok(None)` - No user in session (not logged in)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    /// - `Err(AppError::InternalErr(_))` - Stored ID is not a valid u64
    pub async fn get_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        let name = self
            .session
            .get::<String>(SESSION_AUTH_USER_NAME)
            .await?
            .unwrap_or_default();

        Ok(Some(User {
            discord_id: parse_u64_from_string(user_id)?,
            name,
        }))
    }

    /// Clears all data from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// Tokens are stored when the login redirect is issued and validated during the
/// OAuth2 callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token, so each token validates at most once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
