//! `eda` command line: load a CSV and run one exploratory activity on it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tabular_eda::analysis::{run_activity, Activity, ActivityOutput};
use tabular_eda::ingestion::{load_csv, InferOptions, LoadOptions, TracingObserver};
use tabular_eda::resolver::{FillValue, MissingValueStrategy};
use tabular_eda::summary::DEFAULT_PREVIEW_ROWS;
use tabular_eda::types::DataSet;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis for CSV files",
    long_about = "Load a CSV file, infer its column types, and print summaries or resolve \
                  missing values with a per-cell audit trail.\n\n\
                  EXAMPLES:\n  \
                  eda -i data.csv show\n  \
                  eda -i data.csv describe\n  \
                  eda -i data.csv unique --column species\n  \
                  eda -i data.csv fill --value median\n  \
                  eda -i data.csv --json drop"
)]
struct Args {
    /// Path to the CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Rows sampled for type inference (0 = all rows)
    #[arg(long, default_value = "1000")]
    infer_rows: usize,

    /// Print the activity output as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every row of the raw data
    Show,
    /// Show the first rows
    Head {
        #[arg(short, default_value_t = DEFAULT_PREVIEW_ROWS)]
        n: usize,
    },
    /// Show the last rows
    Tail {
        #[arg(short, default_value_t = DEFAULT_PREVIEW_ROWS)]
        n: usize,
    },
    /// Descriptive statistics of numeric columns
    Describe,
    /// Missing cells per column
    Missing,
    /// Distinct values of one column with counts
    Unique {
        #[arg(short, long)]
        column: String,
    },
    /// Pearson correlation between numeric columns
    Correlation,
    /// Fill missing cells with mean, median, or a literal value
    Fill {
        #[arg(short, long, default_value = "mean")]
        value: String,
    },
    /// Drop rows containing any missing cell
    Drop,
}

impl From<Command> for Activity {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Show => Activity::ShowAll,
            Command::Head { n } => Activity::Head { n },
            Command::Tail { n } => Activity::Tail { n },
            Command::Describe => Activity::Describe,
            Command::Missing => Activity::MissingValues,
            Command::Unique { column } => Activity::UniqueValues { column },
            Command::Correlation => Activity::Correlation,
            Command::Fill { value } => {
                Activity::HandleMissing(MissingValueStrategy::Fill(FillValue::parse(&value)))
            }
            Command::Drop => Activity::HandleMissing(MissingValueStrategy::Drop),
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays clean.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let options = LoadOptions {
        infer: InferOptions {
            max_rows: (args.infer_rows > 0).then_some(args.infer_rows),
            ..Default::default()
        },
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };
    let dataset = load_csv(&args.input, &options)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!(
        numeric = ?dataset.schema.numeric_columns(),
        categorical = ?dataset.schema.categorical_columns(),
        "column classification"
    );

    let activity = Activity::from(args.command);
    let output = run_activity(&dataset, &activity)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_output(&output);
    }
    Ok(())
}

/// Plain-text rendering. Uses `println!` because this is the command's primary output.
fn print_output(output: &ActivityOutput) {
    match output {
        ActivityOutput::Rows { dataset } => print_table(dataset),
        ActivityOutput::Description { columns } => {
            println!(
                "{:<16} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
            );
            for c in columns {
                println!(
                    "{:<16} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                    c.column, c.count, c.mean, c.std, c.min, c.p25, c.p50, c.p75, c.max
                );
            }
        }
        ActivityOutput::MissingValues { counts } => {
            for c in counts {
                println!("{:<24} {}", c.column, c.missing);
            }
        }
        ActivityOutput::UniqueValues { column, counts } => {
            println!("{column}'s unique values");
            for c in counts {
                println!("{:<24} {}", c.value.to_string(), c.count);
            }
        }
        ActivityOutput::Correlation { matrix } => {
            print!("{:<16}", "");
            for name in &matrix.columns {
                print!(" {name:>12}");
            }
            println!();
            for (name, row) in matrix.columns.iter().zip(&matrix.values) {
                print!("{name:<16}");
                for r in row {
                    print!(" {r:>12.3}");
                }
                println!();
            }
        }
        ActivityOutput::Resolved {
            dataset,
            messages,
            remaining_missing,
            ..
        } => {
            print_table(dataset);
            println!();
            for message in messages {
                println!("{message}");
            }
            println!();
            for c in remaining_missing {
                println!("{:<24} {}", c.column, c.missing);
            }
        }
    }
}

fn print_table(dataset: &DataSet) {
    print!("{:>6}", "");
    for name in dataset.schema.field_names() {
        print!(" {name:>14}");
    }
    println!();
    for (label, row) in dataset.index.iter().zip(&dataset.rows) {
        print!("{label:>6}");
        for v in row {
            print!(" {:>14}", v.to_string());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::{Activity, Args};
    use clap::Parser;

    #[test]
    fn show_subcommand_selects_every_row() {
        let args = Args::try_parse_from(["eda", "-i", "data.csv", "show"]).unwrap();
        assert_eq!(Activity::from(args.command), Activity::ShowAll);
    }

    #[test]
    fn fill_value_maps_to_strategy() {
        let args = Args::try_parse_from(["eda", "-i", "data.csv", "fill", "--value", "median"]).unwrap();
        assert!(matches!(Activity::from(args.command), Activity::HandleMissing(_)));
    }
}
