//! Attribute Calculator CLI
//!
//! Builds attributes from description strings and value lists and runs the
//! merge/subtract algebra on them, reporting duplicate and missing values.

use clap::{Parser, Subcommand};
use dirattr::{factory, AttributeBuilder, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attrcalc")]
#[command(about = "Build and combine schema-aware attribute value sets")]
struct Cli {
    /// Emit results as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single attribute and show its deduplicated values
    Show {
        /// Attribute description (e.g., "cn" or "cn;lang-en")
        description: String,
        /// Attribute values
        values: Vec<String>,
    },

    /// Merge two value sets under one attribute type
    Merge {
        /// Attribute description for both operands
        description: String,
        /// Values of the first operand
        #[arg(long, num_args = 1..)]
        first: Vec<String>,
        /// Values of the second operand
        #[arg(long, num_args = 1..)]
        second: Vec<String>,
    },

    /// Subtract the second value set from the first
    Subtract {
        /// Attribute description for both operands
        description: String,
        /// Values of the first operand
        #[arg(long, num_args = 1..)]
        first: Vec<String>,
        /// Values of the second operand
        #[arg(long, num_args = 1..)]
        second: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::core();

    match cli.command {
        Commands::Show {
            description,
            values,
        } => {
            let mut builder = AttributeBuilder::parse(&description, &schema)?;
            builder.add_all(values);
            let attr = builder.into_attribute();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&attr)?);
            } else {
                println!("{}", attr);
                if attr.attribute_type().placeholder {
                    println!("(type not in schema; using placeholder)");
                }
            }
        }

        Commands::Merge {
            description,
            first,
            second,
        } => {
            let (a1, a2) = build_operands(&schema, &description, first, second)?;
            let mut duplicates = Vec::new();
            let merged = factory::merge_with_duplicates(&a1, &a2, &mut duplicates);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "result": merged,
                        "duplicates": duplicates,
                    }))?
                );
            } else {
                println!("{}", merged);
                for value in &duplicates {
                    println!("duplicate: {}", value);
                }
            }
        }

        Commands::Subtract {
            description,
            first,
            second,
        } => {
            let (a1, a2) = build_operands(&schema, &description, first, second)?;
            let mut missing = Vec::new();
            let result = factory::subtract_with_missing(&a1, &a2, &mut missing);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "result": result,
                        "missing": missing,
                    }))?
                );
            } else {
                println!("{}", result);
                for value in &missing {
                    println!("missing: {}", value);
                }
            }
        }
    }

    Ok(())
}

fn build_operands(
    schema: &Schema,
    description: &str,
    first: Vec<String>,
    second: Vec<String>,
) -> Result<(dirattr::Attribute, dirattr::Attribute), Box<dyn std::error::Error>> {
    let mut b1 = AttributeBuilder::parse(description, schema)?;
    b1.add_all(first);
    let mut b2 = AttributeBuilder::parse(description, schema)?;
    b2.add_all(second);
    Ok((b1.into_attribute(), b2.into_attribute()))
}
