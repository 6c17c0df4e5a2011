//! Seeded dataset generation
//!
//! All randomness flows through one `StdRng` seeded from the caller's
//! value, so identical inputs reproduce identical tables. Orders pick
//! customers and products by row index, which makes referential
//! consistency hold by construction.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Category, Customer, MockDataset, Order, Product};

/// Per-table row counts. Defaults mirror the demo dataset: 20 customers,
/// 15 products, 50 orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSizes {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

impl Default for DatasetSizes {
    fn default() -> Self {
        Self {
            customers: 20,
            products: 15,
            orders: 50,
        }
    }
}

const CATEGORY_NAMES: &[&str] = &["Electronics", "Clothing", "Books", "Home & Garden", "Sports"];

const SEGMENTS: &[&str] = &["Consumer", "SMB", "Enterprise"];

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Elena", "Frank", "Grace", "Hassan", "Ingrid", "Jonas",
    "Kavya", "Liam", "Mei", "Noah", "Olga", "Priya", "Quentin", "Rosa", "Sam", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Brown", "Chen", "Diaz", "Eriksson", "Fischer", "Garcia", "Haddad", "Ivanova",
    "Johnson", "Kim", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Patel", "Quinn", "Rossi",
    "Schmidt", "Tanaka",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Compact", "Deluxe", "Essential", "Portable", "Premium", "Classic", "Smart", "Eco", "Pro",
    "Ultra",
];

const PRODUCT_NOUNS: &[&str] = &[
    "Speaker", "Jacket", "Notebook", "Lamp", "Racket", "Charger", "Sweater", "Atlas", "Planter",
    "Dumbbell", "Headset", "Scarf", "Journal", "Kettle", "Yoga Mat",
];

pub(super) fn generate(seed: u64, sizes: &DatasetSizes, as_of: NaiveDate) -> MockDataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let categories: Vec<Category> = CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Category {
            id: format!("CAT_{:02}", i + 1),
            name: (*name).to_string(),
        })
        .collect();

    let mut customers = Vec::with_capacity(sizes.customers);
    for i in 0..sizes.customers {
        let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        customers.push(Customer {
            id: format!("CUST_{:03}", i + 1),
            name: format!("{first} {last}"),
            join_date: as_of - Duration::days(rng.gen_range(30..=365)),
            segment: SEGMENTS[rng.gen_range(0..SEGMENTS.len())].to_string(),
        });
    }

    let mut products = Vec::with_capacity(sizes.products);
    for i in 0..sizes.products {
        let adjective = PRODUCT_ADJECTIVES[rng.gen_range(0..PRODUCT_ADJECTIVES.len())];
        let noun = PRODUCT_NOUNS[rng.gen_range(0..PRODUCT_NOUNS.len())];
        let category = &categories[rng.gen_range(0..categories.len())];
        products.push(Product {
            id: format!("PROD_{:03}", i + 1),
            name: format!("{adjective} {noun}"),
            category_id: category.id.clone(),
            price: round_cents(rng.gen_range(10.0..500.0)),
        });
    }

    let mut orders = Vec::with_capacity(sizes.orders);
    if !customers.is_empty() && !products.is_empty() {
        for i in 0..sizes.orders {
            let customer = &customers[rng.gen_range(0..customers.len())];
            let product = &products[rng.gen_range(0..products.len())];
            orders.push(Order {
                id: format!("ORDER_{:03}", i + 1),
                customer_id: customer.id.clone(),
                product_id: product.id.clone(),
                date: as_of - Duration::days(rng.gen_range(1..=90)),
                quantity: rng.gen_range(1..=5),
            });
        }
    }

    debug!(
        seed,
        customers = customers.len(),
        products = products.len(),
        orders = orders.len(),
        %as_of,
        "generated mock dataset"
    );

    MockDataset {
        customers,
        orders,
        products,
        categories,
        as_of,
        seed,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
