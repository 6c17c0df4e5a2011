//! The query rule table
//!
//! Each recognized phrase shape is one `QueryPattern`: a set of required
//! phrases, a parameter extractor, and a result builder. The table is
//! tried in declaration order and the first match wins; there is no
//! scoring or backtracking.

use regex::Regex;
use std::sync::OnceLock;

use super::builders;
use super::QueryResult;
use crate::dataset::MockDataset;

/// Parameters extracted from a normalized query. Every field is optional;
/// builders fall back to pattern-specific defaults, so extraction never
/// fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pub threshold: Option<i64>,
    pub window_days: Option<i64>,
    pub amount: Option<f64>,
    pub count: Option<i64>,
    pub months: Option<i64>,
    pub category: Option<String>,
}

/// A rule mapping a recognized phrase shape to a parameter extractor and
/// a result builder.
pub struct QueryPattern {
    /// Stable identifier, also reported on results.
    pub name: &'static str,
    /// Human-readable template offered as a suggestion for unmatched input.
    pub template: &'static str,
    /// Phrases that must all be substrings of the normalized input.
    pub required: &'static [&'static str],
    pub extract: fn(&str) -> Params,
    pub build: fn(&MockDataset, &Params) -> QueryResult,
}

impl QueryPattern {
    /// True when every required phrase occurs in the normalized input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.required.iter().all(|p| normalized.contains(p))
    }
}

/// The ordered rule table. Declaration order is the tie-break: patterns
/// with more specific phrases are listed before the broader ones they
/// would otherwise shadow ("products ordered by more than" must precede
/// the customer-order rule, which also sees "ordered" and "more than").
pub fn patterns() -> &'static [QueryPattern] {
    PATTERNS
}

static PATTERNS: &[QueryPattern] = &[
    QueryPattern {
        name: "products_in_category",
        template: "FIND Products in category Electronics",
        required: &["products", "in category"],
        extract: extract_category,
        build: builders::products_in_category,
    },
    QueryPattern {
        name: "product_popularity",
        template: "FIND Products ordered by more than 3 customers",
        required: &["products", "ordered by more than"],
        extract: extract_count,
        build: builders::product_popularity,
    },
    QueryPattern {
        name: "customer_orders",
        template: "FIND Customers who ordered more than 2 products in the last 30 days",
        required: &["customers", "ordered", "more than"],
        extract: extract_threshold_window,
        build: builders::customer_orders,
    },
    QueryPattern {
        name: "high_value_customers",
        template: "FIND Customers with total order value greater than $500",
        required: &["customers", "total order value"],
        extract: extract_amount,
        build: builders::high_value_customers,
    },
    QueryPattern {
        name: "high_value_customers_spent",
        template: "FIND Customers with total spent above $500",
        required: &["customers", "total spent"],
        extract: extract_amount,
        build: builders::high_value_customers,
    },
    QueryPattern {
        name: "category_analysis",
        template: "FIND Categories with average product price above $100",
        required: &["categories", "average", "price"],
        extract: extract_amount,
        build: builders::category_analysis,
    },
    QueryPattern {
        name: "recent_orders",
        template: "FIND Orders placed in the last 7 days",
        required: &["orders", "last"],
        extract: extract_window,
        build: builders::recent_orders,
    },
    QueryPattern {
        name: "customer_loyalty",
        template: "FIND Customers who have been active for more than 6 months",
        required: &["customers", "active", "months"],
        extract: extract_months,
        build: builders::customer_loyalty,
    },
    QueryPattern {
        name: "order_value_by_segment",
        template: "FIND average order value by segment",
        required: &["average order value", "by segment"],
        extract: extract_none,
        build: builders::order_value_by_segment,
    },
    QueryPattern {
        name: "order_value_by_region",
        template: "FIND average order value by region",
        required: &["average order value", "by region"],
        extract: extract_none,
        build: builders::order_value_by_segment,
    },
];

fn extract_none(_text: &str) -> Params {
    Params::default()
}

/// The suggestion list echoed back on unmatched input.
pub fn templates() -> Vec<String> {
    patterns().iter().map(|p| p.template.to_string()).collect()
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static query regex is valid"))
}

/// First integer following a trigger phrase; numbers elsewhere in the
/// sentence are ignored.
fn number_after(text: &str, cell: &'static OnceLock<Regex>, pattern: &'static str) -> Option<i64> {
    regex(cell, pattern)
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

static MORE_THAN: OnceLock<Regex> = OnceLock::new();
static LAST_DAYS: OnceLock<Regex> = OnceLock::new();
static AMOUNT: OnceLock<Regex> = OnceLock::new();
static MONTHS: OnceLock<Regex> = OnceLock::new();
static CATEGORY: OnceLock<Regex> = OnceLock::new();

fn more_than(text: &str) -> Option<i64> {
    number_after(text, &MORE_THAN, r"more than (\d+)")
}

fn last_days(text: &str) -> Option<i64> {
    number_after(text, &LAST_DAYS, r"last (\d+) days?")
}

fn amount(text: &str) -> Option<f64> {
    // Normalization strips the dollar sign, so the amount is the number
    // after the comparator.
    number_after(text, &AMOUNT, r"(?:greater than|above|over|more than) (\d+)").map(|n| n as f64)
}

fn months(text: &str) -> Option<i64> {
    number_after(text, &MONTHS, r"(?:more than |for )?(\d+) months")
}

fn extract_threshold_window(text: &str) -> Params {
    Params {
        threshold: more_than(text),
        window_days: last_days(text),
        ..Params::default()
    }
}

fn extract_window(text: &str) -> Params {
    Params {
        window_days: last_days(text),
        ..Params::default()
    }
}

fn extract_amount(text: &str) -> Params {
    Params {
        amount: amount(text),
        ..Params::default()
    }
}

fn extract_count(text: &str) -> Params {
    Params {
        count: more_than(text),
        ..Params::default()
    }
}

fn extract_months(text: &str) -> Params {
    Params {
        months: months(text),
        ..Params::default()
    }
}

/// Everything after "category" is the candidate name; the builder matches
/// it against the category table case-insensitively.
fn extract_category(text: &str) -> Params {
    let captured = regex(&CATEGORY, r"category (.+)$")
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    Params {
        category: captured,
        ..Params::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_than_takes_number_after_phrase() {
        assert_eq!(more_than("ordered more than 2 products in 90 days"), Some(2));
        assert_eq!(more_than("ordered more than products"), None);
    }

    #[test]
    fn test_last_days() {
        assert_eq!(last_days("in the last 30 days"), Some(30));
        assert_eq!(last_days("in the last 1 day"), Some(1));
        assert_eq!(last_days("recently"), None);
    }

    #[test]
    fn test_amount_comparators() {
        assert_eq!(amount("total order value greater than 500"), Some(500.0));
        assert_eq!(amount("average product price above 100"), Some(100.0));
        assert_eq!(amount("total spent over 750"), Some(750.0));
        assert_eq!(amount("total spent"), None);
    }

    #[test]
    fn test_months() {
        assert_eq!(months("active for more than 6 months"), Some(6));
        assert_eq!(months("active for 12 months"), Some(12));
    }

    #[test]
    fn test_extract_category() {
        let p = extract_category("products in category home garden");
        assert_eq!(p.category.as_deref(), Some("home garden"));
        let p = extract_category("products in category ");
        assert_eq!(p.category, None);
    }

    #[test]
    fn test_pattern_matching_requires_all_phrases() {
        let table = patterns();
        let customer_orders = table
            .iter()
            .find(|p| p.name == "customer_orders")
            .unwrap();
        assert!(customer_orders.matches("customers who ordered more than 2 products"));
        assert!(!customer_orders.matches("customers who bought products"));
    }

    #[test]
    fn test_popularity_declared_before_customer_orders() {
        let names: Vec<&str> = patterns().iter().map(|p| p.name).collect();
        let pop = names.iter().position(|n| *n == "product_popularity").unwrap();
        let cust = names.iter().position(|n| *n == "customer_orders").unwrap();
        assert!(pop < cust);
    }
}
