use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};

/// A registered shopper. The password hash never leaves the repository
/// except through the credential lookup used for login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
