//! Admin routes under `/admin`.

use axum::Json;
use axum::extract::{FromRef, FromRequestParts, Path, State};
use axum::http::request::Parts;
use client::state::session::Role;
use serde::{Deserialize, Serialize};

use super::user::{AuthUser, UserEnvelope};
use crate::error::ApiError;
use crate::services::users::{User, UserDescriptor, normalize_email};
use crate::state::AppState;

/// Signed-in user holding the admin role.
pub struct AdminUser {
    pub user: User,
}

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { user } = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(ApiError::Forbidden("Admin access required".to_owned()));
        }
        Ok(Self { user })
    }
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserDescriptor>,
}

/// `GET /admin/users`
pub async fn list_users(State(state): State<AppState>, _admin: AdminUser) -> Json<UserList> {
    let users = state.users.list().await.iter().map(User::descriptor).collect();
    Json(UserList { users })
}

#[derive(Deserialize)]
pub struct BlockBody {
    blocked: bool,
}

/// `POST /admin/users/{email}/block`: block or unblock an account. Blocked
/// users lose API access on their next request.
pub async fn block_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(email): Path<String>,
    Json(body): Json<BlockBody>,
) -> Result<Json<UserEnvelope>, ApiError> {
    if body.blocked && normalize_email(&email).as_deref() == Some(admin.user.email.as_str()) {
        return Err(ApiError::BadRequest("You cannot block your own account".to_owned()));
    }
    let user = state.users.set_blocked(&email, body.blocked).await?;
    tracing::info!(admin = %admin.user.email, target = %user.email, blocked = body.blocked, "account block updated");
    Ok(Json(UserEnvelope::from(&user)))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
