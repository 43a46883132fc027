use clap::{Parser, Subcommand};
use csv_pages::{config, output, pipeline};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csv-pages")]
#[command(about = "Turn a CSV file into a linked HTML index and per-row pages")]
#[command(long_about = "\
Turn a CSV file into a linked HTML index and per-row pages

The first CSV record is the header row. Every later record becomes a
page in the pages directory, named after its title column, and the whole
table is spliced into the shell page between comment markers:

  algorithms_tracker.csv           # Input (first record = headers)
  index.html                       # Shell, rewritten in place
  │   <!-- TABLE_START -->
  │   <table>…</table>             # Regenerated on every run
  │   <!-- TABLE_END -->
  pages/
  ├── quicksort.html               # One page per row
  └── quicksort-2.html             # Repeated titles are numbered

A shell with only <!-- TABLE_HERE --> is upgraded to start/end markers.
Without markers the table goes before </body>, or at the end of the file.

Run 'csv-pages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// CSV input file (overrides config)
    #[arg(long, global = true)]
    input: Option<String>,

    /// Shell HTML page to splice the table into (overrides config)
    #[arg(long, global = true)]
    shell: Option<String>,

    /// Directory for detail pages (overrides config)
    #[arg(long, global = true)]
    pages_dir: Option<String>,

    /// Debug logging on stderr (or set CSV_PAGES_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write detail pages and splice the index table (default)
    Build,
    /// Load the CSV and show the pages a build would write
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = Path::new(".");
    match cli.command.take().unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = resolve_site_config(cli)?;
            let summary = pipeline::build(root, &site_config)?;
            output::print_build_output(&summary);
        }
        Command::Check => {
            let site_config = resolve_site_config(cli)?;
            println!("==> Checking {}", site_config.input);
            let summary = pipeline::check(root, &site_config)?;
            output::print_check_output(&summary, &site_config.columns.link);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` and apply command-line overrides on top.
fn resolve_site_config(cli: Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config(&cli.config_dir)?;
    if let Some(input) = cli.input {
        site_config.input = input;
    }
    if let Some(shell) = cli.shell {
        site_config.shell = shell;
    }
    if let Some(pages_dir) = cli.pages_dir {
        site_config.pages_dir = pages_dir;
    }
    site_config.validate()?;
    Ok(site_config)
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("CSV_PAGES_LOG").unwrap_or_else(|_| {
        if verbose { "csv_pages=debug".to_string() } else { "csv_pages=warn".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}
