// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User and exercise API routes.

use crate::error::{AppError, Result};
use crate::models::{Exercise, User};
use crate::time_utils::{format_day_string, format_utc_rfc3339, parse_date_input};
use crate::AppState;
use axum::{
    extract::{FromRequest, Path, Query, Request, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// User and exercise routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(get_logs))
}

// ─── Body Extraction ─────────────────────────────────────────

/// Extractor accepting a JSON or urlencoded-form body.
///
/// The landing page posts forms; API clients post JSON. Dispatch is on the
/// Content-Type header, defaulting to form.
struct JsonOrForm<T>(T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(payload))
        }
    }
}

/// A body field that may arrive as a JSON number or as a string
/// (form bodies always produce strings).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrString {
    /// Truthiness of the raw value: zero and the empty string are falsy.
    fn is_truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Coerce to an integer with leading-digit semantics; input with no
    /// leading integer coerces to 0.
    fn coerce_int(&self) -> i64 {
        match self {
            Self::Int(n) => *n,
            Self::Float(f) => *f as i64,
            Self::Text(s) => parse_leading_int(s),
        }
    }
}

/// Parse the leading integer of a string, e.g. `"30 mins"` -> 30.
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(char::is_ascii_digit).collect();
    leading.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

// ─── Create User ─────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateUserPayload {
    username: Option<String>,
}

/// Created user response.
#[derive(Serialize)]
pub struct CreatedUserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Create a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonOrForm(payload): JsonOrForm<CreateUserPayload>,
) -> Result<Json<CreatedUserResponse>> {
    let username = match payload.username {
        Some(u) if !u.is_empty() => u,
        _ => return Err(AppError::NoUserInput),
    };

    // The existence check fails open: a store error admits the username.
    if state.db.username_exists(&username).await {
        return Err(AppError::UserAlreadyExists);
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username,
        count: 0,
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(CreatedUserResponse {
        username: user.username,
        id: user.id,
    }))
}

// ─── List Users ──────────────────────────────────────────────

/// User summary as returned by the listing endpoint.
#[derive(Serialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub count: i64,
}

/// Get all users. An empty store yields an empty array, not an error.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserSummary>>> {
    let users = state.db.list_users().await?;

    let summaries = users
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            username: u.username,
            count: u.count,
        })
        .collect();

    Ok(Json(summaries))
}

// ─── Add Exercise ────────────────────────────────────────────

#[derive(Deserialize)]
struct AddExercisePayload {
    description: Option<String>,
    duration: Option<NumberOrString>,
    date: Option<String>,
}

/// Added exercise response. `_id` is the owning USER's id.
#[derive(Serialize)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: i64,
    pub date: String,
    #[serde(rename = "_id")]
    pub id: String,
}

/// Log an exercise against a user and bump their running count.
///
/// The exercise insert and the count update are two separate writes with
/// no transaction between them: concurrent calls for the same user can
/// lose a count increment, and a failure between the writes leaves the
/// count behind the real number of records.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    JsonOrForm(payload): JsonOrForm<AddExercisePayload>,
) -> Result<Json<ExerciseResponse>> {
    // Presence/truthiness is checked on the raw values, before coercion:
    // a JSON number 0 is rejected here while the string "0" passes.
    let description = match payload.description {
        Some(d) if !d.is_empty() => d,
        _ => return Err(AppError::MissingExerciseFields),
    };
    let duration = match payload.duration {
        Some(raw) if raw.is_truthy() => raw.coerce_int(),
        _ => return Err(AppError::MissingExerciseFields),
    };
    let date = parse_optional_date(payload.date.as_deref())?.unwrap_or_else(Utc::now);

    let mut user = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let exercise = Exercise {
        id: Uuid::new_v4().to_string(),
        description,
        duration,
        date: format_utc_rfc3339(date),
        user_id: user.id.clone(),
    };
    state.db.set_exercise(&exercise).await?;

    user.count += 1;
    state.db.upsert_user(&user).await?;

    tracing::info!(
        user_id = %user.id,
        exercise_id = %exercise.id,
        duration,
        "Exercise logged"
    );

    Ok(Json(ExerciseResponse {
        username: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: format_day_string(date),
        id: user.id,
    }))
}

// ─── User Logs ───────────────────────────────────────────────

#[derive(Deserialize)]
struct LogsQuery {
    /// Inclusive lower date bound
    from: Option<String>,
    /// Inclusive upper date bound
    to: Option<String>,
    /// Cap on returned entries (no default cap)
    limit: Option<String>,
}

/// One entry of a user's exercise log.
#[derive(Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

/// User log response. `count` is the size of THIS result set, which is
/// not the user's stored running count.
#[derive(Serialize)]
pub struct LogsResponse {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntry>,
}

/// Get a user's exercise log, filtered by date range and capped.
async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogsQuery>,
) -> Result<Json<LogsResponse>> {
    let user = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let from = parse_optional_date(params.from.as_deref())?.map(format_utc_rfc3339);
    let to = parse_optional_date(params.to.as_deref())?.map(format_utc_rfc3339);
    let limit = params
        .limit
        .as_deref()
        .map(parse_leading_int)
        .filter(|n| *n > 0)
        .map(|n| n as u32);

    tracing::debug!(
        user_id = %user.id,
        from = ?from,
        to = ?to,
        limit = ?limit,
        "Fetching exercise log"
    );

    let exercises = state
        .db
        .get_exercises_for_user(&user.id, from.as_deref(), to.as_deref(), limit)
        .await?;

    let log: Vec<LogEntry> = exercises
        .into_iter()
        .map(|e| {
            let date = DateTime::parse_from_rfc3339(&e.date)
                .map(|d| format_day_string(d.with_timezone(&Utc)))
                .unwrap_or(e.date);
            LogEntry {
                description: e.description,
                duration: e.duration,
                date,
            }
        })
        .collect();

    Ok(Json(LogsResponse {
        username: user.username,
        count: log.len(),
        id: user.id,
        log,
    }))
}

/// Parse an optional caller-supplied date; empty strings count as absent.
fn parse_optional_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.filter(|r| !r.is_empty())
        .map(|r| parse_date_input(r).ok_or(AppError::InvalidDate))
        .transpose()
}
