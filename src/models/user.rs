//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID, assigned at creation and never reused
    pub id: String,
    /// Username (uniqueness is checked at creation, not enforced by the store)
    pub username: String,
    /// Running total of exercises logged for this user.
    /// Updated alongside each exercise insert; the two writes are not
    /// transactional, so this can drift from the true exercise count.
    #[serde(default)]
    pub count: i64,
}
