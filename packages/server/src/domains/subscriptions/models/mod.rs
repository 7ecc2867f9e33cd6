mod subscription;

pub use subscription::{Subscription, SubscriptionStatus};
