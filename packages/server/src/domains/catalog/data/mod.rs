mod catalog;

pub use catalog::{CategoryData, ProductData};
