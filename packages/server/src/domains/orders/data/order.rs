use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{OrderId, ProductId, UserId};
use crate::domains::orders::models::{Order, OrderHistory, OrderStatus, PaymentStatus};

/// Public API representation of an active order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderData {
    pub id: OrderId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderData {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            created_at: order.created_at,
        }
    }
}

/// Public API representation of an archived order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryData {
    pub id: OrderId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivered_at: DateTime<Utc>,
}

impl From<OrderHistory> for OrderHistoryData {
    fn from(entry: OrderHistory) -> Self {
        Self {
            id: entry.id,
            customer_id: entry.customer_id,
            product_id: entry.product_id,
            quantity: entry.quantity,
            total_amount: entry.total_amount,
            status: entry.status,
            delivered_at: entry.delivered_at,
        }
    }
}

/// What a successful placement returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub product_name: String,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub remaining_stock: i32,
    pub status: OrderStatus,
}
