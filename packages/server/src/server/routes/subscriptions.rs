use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{AppError, SubscriptionId};
use crate::domains::subscriptions::actions;
use crate::domains::subscriptions::data::{SubscriptionData, SubscriptionReceipt};
use crate::server::app::AppState;
use crate::server::middleware::Identity;
use crate::server::routes::MessageResponse;

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub product_name: String,
    pub quantity_per_cycle: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

/// POST /subscriptions — start a recurring delivery for a product. Places
/// the anchoring order and decrements stock in the same transaction.
pub async fn subscribe(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<SubscriptionReceipt>, AppError> {
    let receipt = actions::subscribe(
        identity.user_id,
        &request.product_name,
        request.quantity_per_cycle,
        request.starts_on,
        request.ends_on,
        &state.deps,
    )
    .await?;

    Ok(Json(receipt))
}

/// GET /subscriptions/status — the caller's subscriptions.
pub async fn my_subscriptions(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<SubscriptionData>>, AppError> {
    let subs = actions::list_my_subscriptions(identity.user_id, &state.deps).await?;
    Ok(Json(subs.into_iter().map(Into::into).collect()))
}

/// DELETE /subscriptions/{id} — cancel one of the caller's subscriptions.
pub async fn cancel_subscription(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<SubscriptionId>,
) -> Result<Json<MessageResponse>, AppError> {
    actions::cancel_subscription(identity.user_id, id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Unsubscribed successfully".to_string(),
    }))
}

/// GET /admin/subscriptions
pub async fn list_all_subscriptions(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<SubscriptionData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageSubscriptions)
        .check()?;

    let subs = actions::list_all_subscriptions(&state.deps).await?;
    Ok(Json(subs.into_iter().map(Into::into).collect()))
}
