//! Dashboard user model.
//!
//! Users aren't persisted. The Discord identity returned by the OAuth2 callback is kept
//! in the session and scopes every backup request to the snapshots that user owns.

use crate::model::user::UserDto;

/// The Discord user behind a dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Display name of the user.
    pub name: String,
}

impl User {
    /// Converts the user to its API representation.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.discord_id,
            name: self.name,
        }
    }
}
