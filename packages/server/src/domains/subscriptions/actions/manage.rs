//! Subscription lifecycle: listings and cancellation.

use tracing::info;

use crate::common::{AppError, SubscriptionId, UserId};
use crate::domains::subscriptions::models::Subscription;
use crate::kernel::ServerDeps;

/// The caller's subscriptions. Empty result is an empty list.
pub async fn list_my_subscriptions(
    customer_id: UserId,
    deps: &ServerDeps,
) -> Result<Vec<Subscription>, AppError> {
    Ok(Subscription::find_by_customer(customer_id, &deps.db_pool).await?)
}

/// Cancel one of the caller's active subscriptions.
pub async fn cancel_subscription(
    customer_id: UserId,
    subscription_id: SubscriptionId,
    deps: &ServerDeps,
) -> Result<(), AppError> {
    let changed =
        Subscription::cancel_for_customer(subscription_id, customer_id, &deps.db_pool).await?;
    if changed == 0 {
        return Err(AppError::NotFound("Subscription"));
    }

    info!(subscription_id = %subscription_id, "Subscription cancelled");
    Ok(())
}

/// Every subscription (admin listing).
pub async fn list_all_subscriptions(deps: &ServerDeps) -> Result<Vec<Subscription>, AppError> {
    Ok(Subscription::find_all(&deps.db_pool).await?)
}
