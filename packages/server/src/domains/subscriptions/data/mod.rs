mod subscription;

pub use subscription::{SubscriptionData, SubscriptionReceipt};
