//! colsplit CLI - split a translations CSV into per-column JSON fragments
//!
//! # Main Commands
//!
//! ```bash
//! colsplit pivot input.csv             # One fragment per column, keyed by RU
//! colsplit pivot input.csv -c EN -c DE # Only the EN and DE fragments
//! colsplit pivot input.csv -f json     # One JSON document with every mapping
//! colsplit serve                       # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! colsplit parse input.csv             # Just parse CSV to JSON
//! colsplit columns input.csv           # Headers with entry/skip counts
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colsplit::logging::{init_logging, LogConfig};
use colsplit::transform::pipeline::format_delimiter;
use colsplit::{
    format_document, parse_bytes_with, parse_delimiter, pivot_csv, AppConfig, PipelineResult,
    PivotResult,
};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "colsplit", version)]
#[command(about = "Split a translations CSV into per-column JSON fragments", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter, or "tab" (auto-detect if not specified)
        #[arg(short, long, value_parser = delimiter_arg)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pivot every column on the key column and print the fragments
    Pivot {
        /// Input CSV file
        input: PathBuf,

        /// Key column (default: COLSPLIT_KEY_COLUMN or "RU")
        #[arg(short, long = "key-column")]
        key: Option<String>,

        /// Leave the key column's own mapping out
        #[arg(long)]
        exclude_key: bool,

        /// Only output these columns, in this order
        #[arg(short, long = "column")]
        columns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Fragment)]
        format: OutputFormat,

        /// CSV delimiter, or "tab" (auto-detect if not specified)
        #[arg(short, long, value_parser = delimiter_arg)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the columns with their entry and skip counts
    Columns {
        /// Input CSV file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: COLSPLIT_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Paste-ready fragments, each under a `// <column>` banner
    Fragment,
    /// One pretty JSON object keyed by column
    Json,
}

fn delimiter_arg(value: &str) -> Result<char, String> {
    parse_delimiter(value)
        .ok_or_else(|| format!("'{value}' is not a single ASCII character or \"tab\""))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(std::io::stderr().is_terminal()));

    let result = match cli.command {
        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Pivot {
            input,
            key,
            exclude_key,
            columns,
            format,
            delimiter,
            output,
        } => load_config().and_then(|mut config| {
            if let Some(key) = key {
                config.key_column = key;
            }
            if exclude_key {
                config.include_key_column = false;
            }
            cmd_pivot(&input, &config, &columns, format, delimiter, output.as_deref())
        }),

        Commands::Columns { input } => load_config().and_then(|config| cmd_columns(&input, &config)),

        Commands::Serve { port } => match load_config() {
            Ok(mut config) => {
                if let Some(port) = port {
                    config.port = port;
                }
                cmd_serve(config).await
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::from_env()?)
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let bytes = fs::read(input)?;
    let result = parse_bytes_with(&bytes, delimiter)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(result.delimiter),
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_pivot(
    input: &Path,
    config: &AppConfig,
    columns: &[String],
    format: OutputFormat,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = pivot_csv(input, &config.pivot_options(), delimiter)?;

    print_summary(&result);

    let rendered = render(&result, columns, format)?;
    write_output(&rendered, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

/// Render the selected columns in the requested format.
fn render(
    result: &PipelineResult,
    columns: &[String],
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let selected = result.select(columns)?;

    let rendered = match format {
        OutputFormat::Fragment => selected
            .iter()
            .map(|f| format!("// {}\n{}", f.column, f.fragment))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let picked = selected
                .iter()
                .filter_map(|f| result.pivots.get(&f.column))
                .cloned()
                .collect();
            format_document(&PivotResult::new(result.pivots.key_column(), picked))?
        }
    };

    Ok(rendered)
}

fn print_summary(result: &PipelineResult) {
    let info = &result.csv_info;
    eprintln!("   Encoding: {}", info.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(info.delimiter));
    eprintln!("   Rows: {}", info.row_count);
    eprintln!("   Columns: {}", info.headers.join(", "));
    if !info.key_column_present {
        eprintln!("   ⚠️  Key column '{}' not found", info.key_column);
    }
}

fn cmd_columns(input: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let result = pivot_csv(input, &config.pivot_options(), None)?;

    print_summary(&result);
    eprintln!();

    for fragment in &result.fragments {
        println!(
            "{:<24} {:>6} entries {:>6} skipped",
            fragment.column, fragment.entries, fragment.skipped
        );
    }

    Ok(())
}

async fn cmd_serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    colsplit::server::start_server(config).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colsplit::{pivot_bytes, PivotOptions};
    use serde_json::Value;

    fn scenario() -> PipelineResult {
        pivot_bytes(
            "RU,EN,DE\nпривет,hello,hallo\nмир,world,\n".as_bytes(),
            &PivotOptions::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pivot_args() {
        let cli = Cli::try_parse_from([
            "colsplit", "-v", "pivot", "in.csv", "--key-column", "EN", "--exclude-key", "-c", "DE", "-c",
            "RU", "-f", "json", "-d", "tab",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Pivot {
                key,
                exclude_key,
                columns,
                format,
                delimiter,
                ..
            } => {
                assert_eq!(key.as_deref(), Some("EN"));
                assert!(exclude_key);
                assert_eq!(columns, vec!["DE", "RU"]);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(delimiter, Some('\t'));
            }
            _ => panic!("expected pivot"),
        }
    }

    #[test]
    fn test_bad_delimiter_rejected() {
        assert!(Cli::try_parse_from(["colsplit", "parse", "in.csv", "-d", ";;"]).is_err());
    }

    #[test]
    fn test_render_fragments_with_banner() {
        let out = render(&scenario(), &["DE".to_string()], OutputFormat::Fragment).unwrap();
        assert_eq!(out, "// DE\n,\n  \"привет\": \"hallo\"\n");
    }

    #[test]
    fn test_render_json_document() {
        let out = render(&scenario(), &["EN".to_string()], OutputFormat::Json).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(doc["EN"]["мир"], "world");
        assert!(doc.get("DE").is_none());
    }

    #[test]
    fn test_render_unknown_column() {
        let err = render(&scenario(), &["FR".to_string()], OutputFormat::Fragment).unwrap_err();
        assert!(err.to_string().contains("FR"));
    }
}
