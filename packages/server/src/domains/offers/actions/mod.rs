mod upload;

pub use upload::{list_offers, store_offer};
