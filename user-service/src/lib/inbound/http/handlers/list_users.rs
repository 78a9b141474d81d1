use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = match query.role {
        Some(role) => {
            let role =
                Role::new(role).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
            state.user_service.get_users_by_role(&role).await
        }
        None => state.user_service.list_users().await,
    }
    .map_err(ApiError::from)?;

    let data = users.iter().map(UserData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListUsersQuery {
    role: Option<String>,
}
