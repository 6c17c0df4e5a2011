//! GraphOps CLI: run natural-language queries against a seeded mock
//! dataset, inspect schemas, and request LLM insights.
//!
//! Everything runs in-process; the only outbound call is the optional
//! LLM request behind the `insight` subcommand.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graphops::insight::client::LlmClient;
use graphops::insight::{InsightContext, InsightEngine, LlmConfig};
use graphops::query::{interpret, templates, Interpretation, QueryResult};
use graphops::schema::GraphSchema;
use graphops::{DatasetSizes, MockDataset};

#[derive(Parser)]
#[command(name = "graphops", version, about = "GraphOps Playground CLI")]
struct Cli {
    /// Dataset seed
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Customer row count
    #[arg(long, default_value_t = 20, global = true)]
    customers: usize,

    /// Product row count
    #[arg(long, default_value_t = 15, global = true)]
    products: usize,

    /// Order row count
    #[arg(long, default_value_t = 50, global = true)]
    orders: usize,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a natural-language query against a freshly seeded dataset
    Query {
        /// The query text, e.g. "FIND Customers who ordered more than 2 products"
        text: String,
    },
    /// List the recognized query templates
    Templates,
    /// Parse a YAML schema file (or show the example schema) and print its summary
    Schema {
        /// Path to a YAML schema file
        file: Option<std::path::PathBuf>,
    },
    /// Interpret a query, then ask the configured LLM for insights
    Insight {
        /// The query text
        text: String,

        /// Also request roadmap suggestions built on the insights
        #[arg(long)]
        roadmap: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let sizes = DatasetSizes {
        customers: cli.customers,
        products: cli.products,
        orders: cli.orders,
    };

    let result = match &cli.command {
        Commands::Query { text } => run_query(&cli, &sizes, text),
        Commands::Templates => run_templates(),
        Commands::Schema { file } => run_schema(file.as_deref()),
        Commands::Insight { text, roadmap } => run_insight(&cli, &sizes, text, *roadmap).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_query(cli: &Cli, sizes: &DatasetSizes, text: &str) -> anyhow::Result<()> {
    let dataset = MockDataset::generate(cli.seed, sizes);
    match interpret(text, &dataset) {
        Interpretation::Matched(result) => print_result(&result, &cli.format)?,
        Interpretation::Unmatched(unmatched) => {
            println!("Could not parse: {:?}", unmatched.original);
            println!("Try one of the templates:");
            for suggestion in &unmatched.suggestions {
                println!("  {}", suggestion);
            }
        }
    }
    Ok(())
}

fn run_templates() -> anyhow::Result<()> {
    for template in templates() {
        println!("{}", template);
    }
    Ok(())
}

fn run_schema(file: Option<&std::path::Path>) -> anyhow::Result<()> {
    let schema = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GraphSchema::from_yaml(&text)?
        }
        None => GraphSchema::example(),
    };
    print!("{}", schema.summary());
    Ok(())
}

async fn run_insight(cli: &Cli, sizes: &DatasetSizes, text: &str, roadmap: bool) -> anyhow::Result<()> {
    let dataset = MockDataset::generate(cli.seed, sizes);
    let result = match interpret(text, &dataset) {
        Interpretation::Matched(result) => result,
        Interpretation::Unmatched(unmatched) => {
            return Err(anyhow!(
                "query {:?} did not match any template; run `graphops-cli templates`",
                unmatched.original
            ));
        }
    };

    print_result(&result, &cli.format)?;

    let config = LlmConfig::openai_from_env().context("LLM not configured")?;
    let client = LlmClient::new(&config)?;
    let engine = InsightEngine::new(client);
    let schema = GraphSchema::example();
    let ctx = InsightContext {
        schema: &schema,
        query: text,
        result: &result,
    };

    // An LLM failure degrades to a visible message; the query result above
    // has already been printed.
    match engine.business_insights(&ctx).await {
        Ok(insights) => {
            println!("\n--- Insights ---\n{}", insights);
            if roadmap {
                match engine.roadmap_suggestions(&ctx, Some(&insights)).await {
                    Ok(suggestions) => println!("\n--- Roadmap ---\n{}", suggestions),
                    Err(e) => eprintln!("Roadmap generation unavailable: {}", e),
                }
            }
        }
        Err(e) => eprintln!("Insight generation unavailable: {}", e),
    }

    Ok(())
}

fn print_result(result: &QueryResult, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(result.table.columns());

            for row in result.table.rows() {
                let cells: Vec<String> = result
                    .table
                    .columns()
                    .iter()
                    .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
                    .collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s): {}", result.table.len(), result.summary);
        }
    }
    Ok(())
}
