use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{auth::AuthGuard, session::AuthSession},
    model::user::User,
};
use test_utils::builder::TestBuilder;

mod require;
