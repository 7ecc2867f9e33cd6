use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{OrderId, ProductId, SubscriptionId, UserId};
use crate::domains::subscriptions::models::{Subscription, SubscriptionStatus};

/// Public API representation of a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionData {
    pub id: SubscriptionId,
    pub customer_id: UserId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity_per_cycle: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: SubscriptionStatus,
}

impl From<Subscription> for SubscriptionData {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id,
            customer_id: sub.customer_id,
            order_id: sub.order_id,
            product_id: sub.product_id,
            quantity_per_cycle: sub.quantity_per_cycle,
            starts_on: sub.starts_on,
            ends_on: sub.ends_on,
            status: sub.status,
        }
    }
}

/// What a successful subscribe returns: the subscription plus the order it
/// was anchored to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionReceipt {
    pub subscription: SubscriptionData,
    pub order_id: OrderId,
    pub total_amount: Decimal,
    pub remaining_stock: i32,
}
