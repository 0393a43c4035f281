use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};
use crate::domain::user::User;

/// Identity resolved from the session for the current request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Username,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
