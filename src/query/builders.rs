//! Canned result builders
//!
//! One builder per recognized phrase shape. Each filters, joins, or
//! aggregates the mock dataset and returns rows plus a one-line summary.
//! Builders iterate tables in declaration order, so output order is
//! deterministic for a fixed dataset. Missing parameters fall back to the
//! defaults of the original query templates.

use chrono::Duration;
use indexmap::IndexMap;
use std::collections::HashSet;

use super::pattern::Params;
use super::value::ResultTable;
use super::QueryResult;
use crate::dataset::MockDataset;
use crate::row;

const DEFAULT_PRODUCT_THRESHOLD: i64 = 2;
const DEFAULT_WINDOW_DAYS: i64 = 30;
const DEFAULT_RECENT_DAYS: i64 = 7;
const DEFAULT_SPEND_AMOUNT: f64 = 500.0;
const DEFAULT_PRICE_AMOUNT: f64 = 100.0;
const DEFAULT_BUYER_COUNT: i64 = 3;
const DEFAULT_TENURE_MONTHS: i64 = 6;

fn result(pattern: &'static str, table: ResultTable, summary: String) -> QueryResult {
    QueryResult {
        pattern,
        table,
        summary,
    }
}

fn money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Products belonging to one category, matched case-insensitively.
/// An unknown category is a valid zero-row result, not a failure.
pub(super) fn products_in_category(ds: &MockDataset, params: &Params) -> QueryResult {
    let mut table = ResultTable::new(["Product ID", "Product", "Category", "Price"]);
    let requested = params.category.as_deref().unwrap_or("");

    let Some(category) = ds.category_by_name(requested) else {
        let summary = if requested.is_empty() {
            "No category name given; try e.g. \"products in category Electronics\"".to_string()
        } else {
            format!("No category named \"{requested}\"")
        };
        return result("products_in_category", table, summary);
    };

    for product in ds.products.iter().filter(|p| p.category_id == category.id) {
        table.push(row![
            "Product ID" => product.id.as_str(),
            "Product" => product.name.as_str(),
            "Category" => category.name.as_str(),
            "Price" => product.price,
        ]);
    }

    let summary = format!("{} products in category {}", table.len(), category.name);
    result("products_in_category", table, summary)
}

/// Products ordered by more than N distinct customers.
pub(super) fn product_popularity(ds: &MockDataset, params: &Params) -> QueryResult {
    let count = params.count.unwrap_or(DEFAULT_BUYER_COUNT);
    let mut table = ResultTable::new(["Product ID", "Product", "Customers", "Price", "Category"]);

    for product in &ds.products {
        let buyers: HashSet<&str> = ds
            .orders
            .iter()
            .filter(|o| o.product_id == product.id)
            .map(|o| o.customer_id.as_str())
            .collect();
        if buyers.len() as i64 > count {
            let category = ds
                .category(&product.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or("");
            table.push(row![
                "Product ID" => product.id.as_str(),
                "Product" => product.name.as_str(),
                "Customers" => buyers.len(),
                "Price" => product.price,
                "Category" => category,
            ]);
        }
    }

    let summary = format!(
        "{} products were ordered by more than {} customers",
        table.len(),
        count
    );
    result("product_popularity", table, summary)
}

/// Customers who ordered more than N distinct products inside the window.
pub(super) fn customer_orders(ds: &MockDataset, params: &Params) -> QueryResult {
    let threshold = params.threshold.unwrap_or(DEFAULT_PRODUCT_THRESHOLD);
    let days = params.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let cutoff = ds.as_of - Duration::days(days);
    let mut table = ResultTable::new([
        "Customer ID",
        "Customer",
        "Distinct Products",
        "Segment",
        "Join Date",
    ]);

    for customer in &ds.customers {
        let distinct: HashSet<&str> = ds
            .orders
            .iter()
            .filter(|o| o.customer_id == customer.id && o.date >= cutoff)
            .map(|o| o.product_id.as_str())
            .collect();
        if distinct.len() as i64 > threshold {
            table.push(row![
                "Customer ID" => customer.id.as_str(),
                "Customer" => customer.name.as_str(),
                "Distinct Products" => distinct.len(),
                "Segment" => customer.segment.as_str(),
                "Join Date" => customer.join_date,
            ]);
        }
    }

    let summary = format!(
        "{} customers ordered more than {} distinct products in the last {} days",
        table.len(),
        threshold,
        days
    );
    result("customer_orders", table, summary)
}

/// Customers whose lifetime order value exceeds the amount.
pub(super) fn high_value_customers(ds: &MockDataset, params: &Params) -> QueryResult {
    let amount = params.amount.unwrap_or(DEFAULT_SPEND_AMOUNT);
    let mut table = ResultTable::new(["Customer ID", "Customer", "Total Spent", "Orders", "Segment"]);

    for customer in &ds.customers {
        let mut total = 0.0;
        let mut orders = 0usize;
        for order in ds.orders.iter().filter(|o| o.customer_id == customer.id) {
            total += ds.order_total(order);
            orders += 1;
        }
        if total > amount {
            table.push(row![
                "Customer ID" => customer.id.as_str(),
                "Customer" => customer.name.as_str(),
                "Total Spent" => money(total),
                "Orders" => orders,
                "Segment" => customer.segment.as_str(),
            ]);
        }
    }

    let summary = format!(
        "{} customers with total order value greater than ${:.0}",
        table.len(),
        amount
    );
    result("high_value_customers", table, summary)
}

/// Categories whose average product price exceeds the amount.
pub(super) fn category_analysis(ds: &MockDataset, params: &Params) -> QueryResult {
    let amount = params.amount.unwrap_or(DEFAULT_PRICE_AMOUNT);
    let mut table = ResultTable::new([
        "Category",
        "Products",
        "Average Price",
        "Min Price",
        "Max Price",
    ]);

    for category in &ds.categories {
        let prices: Vec<f64> = ds
            .products
            .iter()
            .filter(|p| p.category_id == category.id)
            .map(|p| p.price)
            .collect();
        if prices.is_empty() {
            continue;
        }
        let avg = prices.iter().sum::<f64>() / prices.len() as f64;
        if avg > amount {
            let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            table.push(row![
                "Category" => category.name.as_str(),
                "Products" => prices.len(),
                "Average Price" => money(avg),
                "Min Price" => money(min),
                "Max Price" => money(max),
            ]);
        }
    }

    let summary = format!(
        "{} categories with average product price above ${:.0}",
        table.len(),
        amount
    );
    result("category_analysis", table, summary)
}

/// Orders placed inside the window, newest first.
pub(super) fn recent_orders(ds: &MockDataset, params: &Params) -> QueryResult {
    let days = params.window_days.unwrap_or(DEFAULT_RECENT_DAYS);
    let cutoff = ds.as_of - Duration::days(days);
    let mut table = ResultTable::new(["Order ID", "Date", "Customer", "Product", "Quantity", "Total"]);

    let mut hits: Vec<_> = ds.orders.iter().filter(|o| o.date >= cutoff).collect();
    hits.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    for order in hits {
        let customer = ds
            .customer(&order.customer_id)
            .map(|c| c.name.as_str())
            .unwrap_or("");
        let product = ds
            .product(&order.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or("");
        table.push(row![
            "Order ID" => order.id.as_str(),
            "Date" => order.date,
            "Customer" => customer,
            "Product" => product,
            "Quantity" => order.quantity,
            "Total" => money(ds.order_total(order)),
        ]);
    }

    let summary = format!("{} orders placed in the last {} days", table.len(), days);
    result("recent_orders", table, summary)
}

/// Customers active for more than N months, measured from join date to
/// the dataset's as-of date. A month counts as 30 days here.
pub(super) fn customer_loyalty(ds: &MockDataset, params: &Params) -> QueryResult {
    let months = params.months.unwrap_or(DEFAULT_TENURE_MONTHS);
    let cutoff = ds.as_of - Duration::days(months * 30);
    let mut table = ResultTable::new([
        "Customer ID",
        "Customer",
        "Join Date",
        "Months Active",
        "Segment",
    ]);

    for customer in ds.customers.iter().filter(|c| c.join_date <= cutoff) {
        let active_months = (ds.as_of - customer.join_date).num_days() / 30;
        table.push(row![
            "Customer ID" => customer.id.as_str(),
            "Customer" => customer.name.as_str(),
            "Join Date" => customer.join_date,
            "Months Active" => active_months,
            "Segment" => customer.segment.as_str(),
        ]);
    }

    let summary = format!(
        "{} customers have been active for more than {} months",
        table.len(),
        months
    );
    result("customer_loyalty", table, summary)
}

/// Average order value grouped by customer segment. Segments appear in
/// customer-table order; segments without orders report zero.
pub(super) fn order_value_by_segment(ds: &MockDataset, _params: &Params) -> QueryResult {
    let mut table = ResultTable::new(["Segment", "Customers", "Orders", "Average Order Value"]);

    struct SegmentStats {
        customers: usize,
        orders: usize,
        total: f64,
    }

    let mut segments: IndexMap<&str, SegmentStats> = IndexMap::new();
    for customer in &ds.customers {
        let stats = segments.entry(customer.segment.as_str()).or_insert(SegmentStats {
            customers: 0,
            orders: 0,
            total: 0.0,
        });
        stats.customers += 1;
        for order in ds.orders.iter().filter(|o| o.customer_id == customer.id) {
            stats.orders += 1;
            stats.total += ds.order_total(order);
        }
    }

    for (segment, stats) in &segments {
        let average = if stats.orders == 0 {
            0.0
        } else {
            stats.total / stats.orders as f64
        };
        table.push(row![
            "Segment" => *segment,
            "Customers" => stats.customers,
            "Orders" => stats.orders,
            "Average Order Value" => money(average),
        ]);
    }

    let summary = format!("Average order value across {} segments", table.len());
    result("order_value_by_segment", table, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSizes;
    use chrono::NaiveDate;

    fn dataset() -> MockDataset {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        MockDataset::generate_at(42, &DatasetSizes::default(), as_of)
    }

    #[test]
    fn test_unknown_category_is_empty_result_with_explanation() {
        let ds = dataset();
        let params = Params {
            category: Some("gadgets".to_string()),
            ..Params::default()
        };
        let out = products_in_category(&ds, &params);
        assert!(out.table.is_empty());
        assert!(out.summary.contains("gadgets"));
    }

    #[test]
    fn test_category_filter_only_returns_that_category() {
        let ds = dataset();
        let params = Params {
            category: Some("electronics".to_string()),
            ..Params::default()
        };
        let out = products_in_category(&ds, &params);
        for row in out.table.rows() {
            assert_eq!(row.get("Category").unwrap().as_str(), Some("Electronics"));
        }
    }

    #[test]
    fn test_customer_orders_threshold_holds() {
        let ds = dataset();
        let params = Params {
            threshold: Some(1),
            window_days: Some(90),
            ..Params::default()
        };
        let out = customer_orders(&ds, &params);
        assert!(!out.table.is_empty(), "90-day window over 50 orders must hit");
        for row in out.table.rows() {
            let n = row.get("Distinct Products").unwrap().as_integer().unwrap();
            assert!(n > 1);
        }
    }

    #[test]
    fn test_high_value_defaults_to_500() {
        let ds = dataset();
        let out = high_value_customers(&ds, &Params::default());
        assert!(out.summary.contains("$500"));
        for row in out.table.rows() {
            assert!(row.get("Total Spent").unwrap().as_float().unwrap() > 500.0);
        }
    }

    #[test]
    fn test_recent_orders_sorted_newest_first() {
        let ds = dataset();
        let params = Params {
            window_days: Some(90),
            ..Params::default()
        };
        let out = recent_orders(&ds, &params);
        let dates: Vec<_> = out
            .table
            .rows()
            .iter()
            .map(|r| r.get("Date").unwrap().as_date().unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(out.table.len(), ds.orders.len());
    }

    #[test]
    fn test_loyalty_respects_cutoff() {
        let ds = dataset();
        let params = Params {
            months: Some(6),
            ..Params::default()
        };
        let out = customer_loyalty(&ds, &params);
        let cutoff = ds.as_of - Duration::days(6 * 30);
        for row in out.table.rows() {
            assert!(row.get("Join Date").unwrap().as_date().unwrap() <= cutoff);
        }
    }

    #[test]
    fn test_segment_aggregate_covers_all_orders() {
        let ds = dataset();
        let out = order_value_by_segment(&ds, &Params::default());
        let orders: i64 = out
            .table
            .rows()
            .iter()
            .map(|r| r.get("Orders").unwrap().as_integer().unwrap())
            .sum();
        assert_eq!(orders as usize, ds.orders.len());
    }

    #[test]
    fn test_empty_dataset_gives_zero_row_results() {
        let sizes = DatasetSizes {
            customers: 0,
            products: 0,
            orders: 0,
        };
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let ds = MockDataset::generate_at(1, &sizes, as_of);
        assert!(high_value_customers(&ds, &Params::default()).table.is_empty());
        assert!(recent_orders(&ds, &Params::default()).table.is_empty());
        assert!(category_analysis(&ds, &Params::default()).table.is_empty());
    }
}
