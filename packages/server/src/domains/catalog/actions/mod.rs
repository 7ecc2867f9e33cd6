mod categories;
mod products;

pub use categories::{add_category, delete_category, list_categories, update_category};
pub use products::{
    add_product, delete_product, list_products, update_product, update_stock, NewProduct,
    ProductChanges,
};
