use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::AppError;
use crate::domains::users::actions;
use crate::domains::users::data::UserData;
use crate::server::app::AppState;
use crate::server::middleware::Identity;

/// GET /me — the caller's profile.
pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<UserData>, AppError> {
    let user = crate::domains::users::models::User::find_by_id(identity.user_id, &state.deps.db_pool)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(Json(user.into()))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// PATCH /me — update the caller's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserData>, AppError> {
    let user = actions::update_profile(
        identity.user_id,
        request.name.as_deref(),
        request.address.as_deref(),
        &state.deps,
    )
    .await?;

    Ok(Json(user.into()))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<UserData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageUsers)
        .check()?;

    let users = actions::list_users(&state.deps).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /admin/users/role/{role}
pub async fn list_users_by_role(
    State(state): State<AppState>,
    identity: Identity,
    Path(role): Path<String>,
) -> Result<Json<Vec<UserData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageUsers)
        .check()?;

    let users = actions::list_users_by_role(&role, &state.deps).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub contact: String,
    pub role: String,
}

/// POST /admin/users — pre-register a supplier or delivery account.
pub async fn add_staff_user(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageUsers)
        .check()?;

    let user =
        actions::add_staff_user(&request.name, &request.contact, &request.role, &state.deps)
            .await?;

    Ok(Json(user.into()))
}
