use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stmtx_export::{to_json_string, write_csv_file, write_transactions_csv};
use stmtx_ingest::{
    extract_raw_text_from_path, HeaderPolicy, ParseOptions, ParsedStatement, PrintOrder,
    StatementParser,
};

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "stmtx", version, about = "Extract transactions from bank statement PDFs")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Statement PDF (or extracted text with --text)
    file: PathBuf,

    /// Treat FILE as already-extracted text instead of a PDF
    #[arg(long)]
    text: bool,

    /// Leave missing header fields empty instead of failing
    #[arg(long)]
    lenient: bool,

    /// Rows are printed newest first
    #[arg(long)]
    newest_first: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print it as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a statement's transactions as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output CSV path (defaults to <output_dir>/<stem>.csv, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage ~/.stmtx/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config (never overwrites)
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config()?;

    // Priority: RUST_LOG env var > --verbose flag > config log_level
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.output.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Parse { input } => {
            let parsed = parse_input(&input, &config)?;
            println!("{}", to_json_string(&parsed)?);
        }

        Command::Export { input, output } => {
            let parsed = parse_input(&input, &config)?;
            match output.or_else(|| default_csv_path(&config, &input.file)) {
                Some(path) => {
                    write_csv_file(&path, parsed.transactions())?;
                    info!(
                        path = %path.display(),
                        rows = parsed.transactions().len(),
                        "wrote CSV"
                    );
                }
                None => write_transactions_csv(std::io::stdout().lock(), parsed.transactions())?,
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&config).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Config defaults, overridden by command-line flags.
fn parse_options(input: &InputArgs, config: &Config) -> ParseOptions {
    let mut options = config.parser;
    if input.lenient {
        options.header_policy = HeaderPolicy::CollectWarnings;
    }
    if input.newest_first {
        options.print_order = PrintOrder::NewestFirst;
    }
    options
}

fn read_input(input: &InputArgs) -> Result<String> {
    let path = &input.file;
    let is_text = input.text || path.extension().is_some_and(|ext| ext == "txt");
    if is_text {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    } else {
        extract_raw_text_from_path(path).with_context(|| format!("decoding {}", path.display()))
    }
}

fn parse_input(input: &InputArgs, config: &Config) -> Result<ParsedStatement> {
    let raw = read_input(input)?;
    let parser = StatementParser::new(parse_options(input, config));
    let parsed = parser
        .parse_with_policy(&raw)
        .with_context(|| format!("parsing {}", input.file.display()))?;

    let transactions = parsed.transactions();
    info!(
        file = %input.file.display(),
        transactions = transactions.len(),
        debits = transactions.iter().filter(|t| t.is_debit()).count(),
        credits = transactions.iter().filter(|t| t.is_credit()).count(),
        missing_fields = parsed.missing_fields().len(),
        "parsed statement"
    );
    if let ParsedStatement::Complete(doc) = &parsed {
        info!(
            total_debits = doc.total_debits(),
            total_credits = doc.total_credits(),
            final_balance = doc.final_balance(),
            "statement totals"
        );
    }
    Ok(parsed)
}

fn default_csv_path(config: &Config, file: &Path) -> Option<PathBuf> {
    let dir = config.output.output_dir.as_ref()?;
    let stem = file.file_stem()?;
    Some(dir.join(stem).with_extension("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_from(args: &[&str]) -> InputArgs {
        match Cli::try_parse_from(args).unwrap().command {
            Command::Parse { input } | Command::Export { input, .. } => input,
            Command::Config { .. } => panic!("expected an input command"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let input = input_from(&["stmtx", "parse", "s.pdf", "--lenient", "--newest-first"]);
        let options = parse_options(&input, &Config::default());
        assert_eq!(options.header_policy, HeaderPolicy::CollectWarnings);
        assert_eq!(options.print_order, PrintOrder::NewestFirst);
    }

    #[test]
    fn test_config_defaults_without_flags() {
        let mut config = Config::default();
        config.parser.print_order = PrintOrder::NewestFirst;
        let input = input_from(&["stmtx", "export", "s.pdf", "-o", "out.csv"]);
        let options = parse_options(&input, &config);
        assert_eq!(options.header_policy, HeaderPolicy::FailFast);
        assert_eq!(options.print_order, PrintOrder::NewestFirst);
    }

    #[test]
    fn test_default_csv_path_uses_output_dir() {
        let mut config = Config::default();
        assert!(default_csv_path(&config, Path::new("jan.pdf")).is_none());

        config.output.output_dir = Some(PathBuf::from("/tmp/csv"));
        assert_eq!(
            default_csv_path(&config, Path::new("statements/jan.pdf")),
            Some(PathBuf::from("/tmp/csv/jan.csv"))
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["stmtx", "config", "show", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
