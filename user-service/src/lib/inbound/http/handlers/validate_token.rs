use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Check a bearer token and report its identity claims.
///
/// A missing header, malformed prefix, or invalid token all answer
/// `valid: false` with status 200; anonymous callers are not an error on
/// this endpoint.
pub async fn validate_token<S: UserServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> ApiSuccess<ValidateTokenResponseData> {
    let claims = bearer_token(&headers)
        .and_then(|token| state.authenticator.validate_token::<auth::Claims>(token).ok());

    let data = match claims {
        Some(claims) => ValidateTokenResponseData {
            valid: true,
            username: Some(claims.sub),
            role: Some(claims.role),
        },
        None => ValidateTokenResponseData {
            valid: false,
            username: None,
            role: None,
        },
    };

    ApiSuccess::new(StatusCode::OK, data)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
