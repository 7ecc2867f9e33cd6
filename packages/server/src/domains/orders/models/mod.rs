mod order;
mod order_history;

pub use order::{Order, OrderStatus, PaymentStatus};
pub use order_history::OrderHistory;
