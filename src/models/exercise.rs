// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise model for storage and API.

use serde::{Deserialize, Serialize};

/// Stored exercise record in Firestore.
///
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Document ID
    pub id: String,
    /// Free-form description
    pub description: String,
    /// Duration as a plain number (units are up to the caller)
    pub duration: i64,
    /// Exercise date/time (RFC3339, `Z` suffix).
    /// Stored as a string so range filters compare chronologically.
    pub date: String,
    /// Owning user's document ID (back-reference, not an enforced key)
    pub user_id: String,
}
