use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{CategoryId, ProductId};
use crate::domains::catalog::models::{Category, Product};

/// Public API representation of a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            active: category.active,
            created_at: category.created_at,
        }
    }
}

/// Public API representation of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    pub stock: i32,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductData {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            unit: product.unit,
            stock: product.stock,
            category_id: product.category_id,
            image_url: product.image_url,
            active: product.active,
            created_at: product.created_at,
        }
    }
}
