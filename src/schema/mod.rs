//! Declarative graph schema
//!
//! A names-only node/edge schema authored as YAML, used for display and
//! as context in LLM prompts. The query interpreter never consumes it.
//!
//! Format:
//!
//! ```yaml
//! nodes:
//!   - Customer
//!   - Order
//! edges:
//!   - Customer -> Order
//! properties:
//!   Customer:
//!     - id: string
//!     - name: string
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("malformed edge {0:?}: expected \"Source -> Target\"")]
    MalformedEdge(String),
    #[error("malformed property {0:?}: expected \"name: type\"")]
    MalformedProperty(String),
    #[error("edge references undeclared node {0:?}")]
    UnknownNode(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// A directed edge between two declared node types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEdge {
    pub source: String,
    pub target: String,
}

/// A typed property declaration on a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub type_name: String,
}

/// A parsed, validated schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSchema {
    pub nodes: Vec<String>,
    pub edges: Vec<SchemaEdge>,
    pub properties: IndexMap<String, Vec<PropertyDecl>>,
}

/// Raw YAML surface before edge/property strings are parsed.
#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<String>,
    #[serde(default)]
    properties: IndexMap<String, Vec<IndexMap<String, String>>>,
}

impl GraphSchema {
    /// Parse and validate a YAML schema document.
    pub fn from_yaml(text: &str) -> SchemaResult<Self> {
        let raw: RawSchema = serde_yaml::from_str(text)?;

        let mut edges = Vec::with_capacity(raw.edges.len());
        for entry in &raw.edges {
            let Some((source, target)) = entry.split_once("->") else {
                return Err(SchemaError::MalformedEdge(entry.clone()));
            };
            let source = source.trim();
            let target = target.trim();
            if source.is_empty() || target.is_empty() {
                return Err(SchemaError::MalformedEdge(entry.clone()));
            }
            edges.push(SchemaEdge {
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        let mut properties = IndexMap::with_capacity(raw.properties.len());
        for (node, decls) in &raw.properties {
            let mut parsed = Vec::with_capacity(decls.len());
            for decl in decls {
                // Each YAML list entry is a single-pair map ("id: string").
                let Some((name, type_name)) = decl.iter().next() else {
                    return Err(SchemaError::MalformedProperty(format!("{node}: <empty>")));
                };
                if decl.len() != 1 || name.trim().is_empty() || type_name.trim().is_empty() {
                    return Err(SchemaError::MalformedProperty(format!("{node}: {name}")));
                }
                parsed.push(PropertyDecl {
                    name: name.trim().to_string(),
                    type_name: type_name.trim().to_string(),
                });
            }
            properties.insert(node.clone(), parsed);
        }

        let schema = Self {
            nodes: raw.nodes,
            edges,
            properties,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Every edge endpoint must be a declared node.
    pub fn validate(&self) -> SchemaResult<()> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.nodes.iter().any(|n| n == endpoint) {
                    return Err(SchemaError::UnknownNode(endpoint.clone()));
                }
            }
        }
        Ok(())
    }

    /// The demo's default commerce schema.
    pub fn example() -> Self {
        let nodes = ["Customer", "Order", "Product", "Category"];
        let edges = [
            ("Customer", "Order"),
            ("Order", "Product"),
            ("Product", "Category"),
            ("Customer", "Product"),
        ];
        let properties: [(&str, &[(&str, &str)]); 4] = [
            (
                "Customer",
                &[
                    ("id", "string"),
                    ("name", "string"),
                    ("join_date", "date"),
                    ("segment", "string"),
                ],
            ),
            (
                "Order",
                &[
                    ("id", "string"),
                    ("customer_id", "string"),
                    ("product_id", "string"),
                    ("order_date", "date"),
                    ("quantity", "int"),
                ],
            ),
            (
                "Product",
                &[
                    ("id", "string"),
                    ("name", "string"),
                    ("price", "float"),
                    ("category_id", "string"),
                ],
            ),
            ("Category", &[("id", "string"), ("name", "string")]),
        ];

        Self {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            edges: edges
                .iter()
                .map(|(s, t)| SchemaEdge {
                    source: s.to_string(),
                    target: t.to_string(),
                })
                .collect(),
            properties: properties
                .iter()
                .map(|(node, decls)| {
                    (
                        node.to_string(),
                        decls
                            .iter()
                            .map(|(name, ty)| PropertyDecl {
                                name: name.to_string(),
                                type_name: ty.to_string(),
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    /// Compact text rendering for display and LLM prompt context.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Nodes: ");
        out.push_str(&self.nodes.join(", "));
        out.push('\n');
        out.push_str("Edges:\n");
        for edge in &self.edges {
            out.push_str(&format!("  {} -> {}\n", edge.source, edge.target));
        }
        if !self.properties.is_empty() {
            out.push_str("Properties:\n");
            for (node, decls) in &self.properties {
                let rendered: Vec<String> = decls
                    .iter()
                    .map(|d| format!("{}: {}", d.name, d.type_name))
                    .collect();
                out.push_str(&format!("  {} ({})\n", node, rendered.join(", ")));
            }
        }
        out
    }
}
