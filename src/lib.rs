// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: log exercises against users and query them back
//!
//! This crate provides the backend API for creating users, recording
//! exercises against them, and retrieving date/count-filtered logs.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
