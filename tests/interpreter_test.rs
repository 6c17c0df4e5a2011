//! End-to-end interpreter tests over a pinned seeded dataset.

use chrono::{Duration, NaiveDate};
use graphops::query::{interpret, Interpretation};
use graphops::{DatasetSizes, MockDataset};
use std::collections::HashSet;

fn dataset() -> MockDataset {
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    MockDataset::generate_at(42, &DatasetSizes::default(), as_of)
}

fn expect_match(query: &str, ds: &MockDataset) -> graphops::QueryResult {
    match interpret(query, ds) {
        Interpretation::Matched(result) => result,
        Interpretation::Unmatched(u) => panic!("expected {:?} to match, got Unmatched({:?})", query, u.original),
    }
}

#[test]
fn customers_over_threshold_are_exactly_reported() {
    let ds = dataset();
    let result = expect_match("FIND Customers who ordered more than 2 products in the last 30 days", &ds);
    assert_eq!(result.pattern, "customer_orders");

    // Recompute independently: distinct products per customer in window.
    let cutoff = ds.as_of - Duration::days(30);
    let mut expected: Vec<&str> = Vec::new();
    for customer in &ds.customers {
        let distinct: HashSet<&str> = ds
            .orders
            .iter()
            .filter(|o| o.customer_id == customer.id && o.date >= cutoff)
            .map(|o| o.product_id.as_str())
            .collect();
        if distinct.len() > 2 {
            expected.push(customer.id.as_str());
        }
    }

    let reported: Vec<&str> = result
        .table
        .rows()
        .iter()
        .map(|r| r.get("Customer ID").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(reported, expected);
}

#[test]
fn garbage_input_is_unmatched_and_echoes_text() {
    let ds = dataset();
    match interpret("asdkjalksd not a real query", &ds) {
        Interpretation::Unmatched(u) => {
            assert_eq!(u.original, "asdkjalksd not a real query");
            assert!(u.suggestions.iter().any(|s| s.contains("Customers")));
        }
        Interpretation::Matched(_) => panic!("garbage must not match"),
    }
}

#[test]
fn category_query_is_case_insensitive() {
    let ds = dataset();
    let upper = expect_match("FIND Products in category Electronics", &ds);
    let lower = expect_match("find products in category electronics", &ds);

    assert_eq!(upper.table.rows(), lower.table.rows());
    for row in upper.table.rows() {
        assert_eq!(row.get("Category").unwrap().as_str(), Some("Electronics"));
    }

    // Every Electronics product appears; none from other categories.
    let electronics = ds.category_by_name("electronics").unwrap();
    let expected = ds
        .products
        .iter()
        .filter(|p| p.category_id == electronics.id)
        .count();
    assert_eq!(upper.table.len(), expected);
}

#[test]
fn repeated_execution_on_one_dataset_is_identical() {
    let ds = dataset();
    let query = "FIND Customers with total order value greater than $500";
    let a = expect_match(query, &ds);
    let b = expect_match(query, &ds);
    assert_eq!(a.table.rows(), b.table.rows());
    assert_eq!(a.summary, b.summary);
}

#[test]
fn earlier_declared_pattern_wins_ties() {
    let ds = dataset();
    let adversarial = "customers who ordered more than 2 products ordered by more than 3 customers";
    let result = expect_match(adversarial, &ds);
    assert_eq!(result.pattern, "product_popularity");
}

#[test]
fn missing_numbers_fall_back_to_defaults() {
    let ds = dataset();
    // "more than" with no number: threshold defaults to 2, window to 30.
    let result = expect_match("customers who ordered more than products", &ds);
    assert_eq!(result.pattern, "customer_orders");
    assert!(result.summary.contains("more than 2"));
    assert!(result.summary.contains("30 days"));
}

#[test]
fn region_phrasing_maps_to_segment_grouping() {
    let ds = dataset();
    let by_region = expect_match("show average order value by region", &ds);
    let by_segment = expect_match("show average order value by segment", &ds);
    assert_eq!(by_region.pattern, "order_value_by_region");
    assert_eq!(by_segment.pattern, "order_value_by_segment");
    assert_eq!(by_region.table.rows(), by_segment.table.rows());
}

#[test]
fn unknown_category_is_zero_rows_not_unmatched() {
    let ds = dataset();
    let result = expect_match("FIND Products in category Spaceships", &ds);
    assert!(result.table.is_empty());
    assert!(result.summary.contains("Spaceships") || result.summary.contains("spaceships"));
}

#[test]
fn all_templates_match_their_own_pattern() {
    let ds = dataset();
    for template in graphops::templates() {
        assert!(
            interpret(&template, &ds).is_matched(),
            "template {:?} failed to match",
            template
        );
    }
}
