//! In-memory mock dataset
//!
//! A small relational dataset (customers, orders, products, categories)
//! generated once per session from a seed. The tables are immutable after
//! generation; the interpreter only reads them.

mod generator;

pub use generator::DatasetSizes;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub join_date: NaiveDate,
    pub segment: String,
}

/// An order row. `customer_id` and `product_id` always resolve against the
/// owning dataset's tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub product_id: String,
    pub date: NaiveDate,
    pub quantity: u32,
}

/// A product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub price: f64,
}

/// A product category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// The seed-generated relational tables standing in for a real data store.
///
/// `as_of` is the date the dataset was generated for; every relative window
/// ("last 30 days", "active for 6 months") is computed against it, so
/// interpreting a fixed dataset yields identical results on any later day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockDataset {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub as_of: NaiveDate,
    seed: u64,
}

impl MockDataset {
    /// Generate a dataset for today. Identical `(seed, sizes)` on the same
    /// day produce identical tables.
    pub fn generate(seed: u64, sizes: &DatasetSizes) -> Self {
        Self::generate_at(seed, sizes, Utc::now().date_naive())
    }

    /// Generate a dataset pinned to an explicit `as_of` date. Fully
    /// deterministic for fixed inputs.
    pub fn generate_at(seed: u64, sizes: &DatasetSizes, as_of: NaiveDate) -> Self {
        generator::generate(seed, sizes, as_of)
    }

    /// The seed this dataset was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category by display name, ignoring case and punctuation
    /// ("home garden" matches "Home & Garden").
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        let wanted = fold_name(name);
        self.categories.iter().find(|c| fold_name(&c.name) == wanted)
    }

    /// Monetary value of an order: quantity times unit price. Zero if the
    /// product is missing, which the generator guarantees cannot happen.
    pub fn order_total(&self, order: &Order) -> f64 {
        self.product(&order.product_id)
            .map(|p| p.price * f64::from(order.quantity))
            .unwrap_or(0.0)
    }
}

/// Lowercase a name and strip punctuation so user-typed category names
/// compare against display names.
fn fold_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_space = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}
