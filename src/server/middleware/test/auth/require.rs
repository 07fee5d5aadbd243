use super::*;

/// Tests a logged in user passes the guard.
///
/// Verifies that the guard returns the user stored in the session with both the
/// Discord ID and display name.
///
/// Expected: Ok(User) matching the stored user
#[tokio::test]
async fn returns_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_db, session) = test.db_and_session().await.unwrap();

    let user = User {
        discord_id: 123456789,
        name: "Tester".to_string(),
    };
    AuthSession::new(session).set_user(&user).await?;

    let result = AuthGuard::new(session).require().await?;

    assert_eq!(result, user);

    Ok(())
}

/// Tests an empty session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_empty_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(session).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests that logging out revokes access.
///
/// Expected: Err(AuthError::UserNotInSession) after clearing
#[tokio::test]
async fn rejects_cleared_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let (_db, session) = test.db_and_session().await.unwrap();

    let auth_session = AuthSession::new(session);
    auth_session
        .set_user(&User {
            discord_id: 42,
            name: "Leaving".to_string(),
        })
        .await?;
    auth_session.clear().await;

    let result = AuthGuard::new(session).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}
