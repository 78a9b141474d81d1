use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::PasswordStatistics;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Report migration progress: per-format hash counts and percentages.
pub async fn password_stats<S: UserServicePort>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<PasswordStatsResponseData>, ApiError> {
    state
        .user_service
        .password_statistics()
        .await
        .map_err(ApiError::from)
        .map(|ref stats| ApiSuccess::new(StatusCode::OK, stats.into()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordStatsResponseData {
    pub total_users: usize,
    pub argon2id_count: usize,
    pub bcrypt_count: usize,
    pub unknown_count: usize,
    pub argon2id_percentage: f64,
    pub bcrypt_percentage: f64,
    pub migration_complete: bool,
}

impl From<&PasswordStatistics> for PasswordStatsResponseData {
    fn from(stats: &PasswordStatistics) -> Self {
        Self {
            total_users: stats.total,
            argon2id_count: stats.argon2id_count,
            bcrypt_count: stats.bcrypt_count,
            unknown_count: stats.unknown_count,
            argon2id_percentage: round2(stats.argon2id_percentage()),
            bcrypt_percentage: round2(stats.bcrypt_percentage()),
            migration_complete: stats.migration_complete(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
