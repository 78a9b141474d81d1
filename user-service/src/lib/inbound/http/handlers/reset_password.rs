use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Change the caller's own password.
///
/// The target account comes from the validated token identity, never from
/// matching submitted passwords against stored records.
pub async fn reset_password<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    let username = Username::new(auth_user.username)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(ApiError::from)?;

    state
        .user_service
        .reset_password(&user.id, &body.current_password, &body.new_password)
        .await
        .map_err(|e| match e {
            UserError::InvalidCredentials => {
                ApiError::BadRequest("Current password is incorrect".to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData {
            message: "Password updated successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    current_password: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub message: String,
}
