use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

/// Guard for endpoints that need a logged in dashboard user.
///
/// Backup endpoints don't check any further permission: every query is scoped to the
/// session user as owner, so a user can only ever see their own snapshots.
pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Returns the logged in user.
    ///
    /// # Returns
    /// - `Ok(User)` - The user stored in the session
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Nobody is logged in
    pub async fn require(&self) -> Result<User, AppError> {
        AuthSession::new(self.session)
            .get_user()
            .await?
            .ok_or_else(|| AuthError::UserNotInSession.into())
    }
}
