mod order;

pub use order::{OrderData, OrderHistoryData, OrderReceipt};
