use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sheetfin::cli::{
    handle_audit_command, handle_import_command, handle_report_command, ReportCommands,
};
use sheetfin::config::{paths::SheetfinPaths, settings::Settings};
use sheetfin::storage::Storage;

#[derive(Parser)]
#[command(
    name = "sheetfin",
    version,
    about = "Reports over a personal-finance spreadsheet",
    long_about = "sheetfin imports the Movimentacoes, Despesas and Cartoes sheets of a \
                  personal-finance spreadsheet (exported as CSV) and derives monthly and \
                  annual reports: cash summary, weekly budget, classification rollup, \
                  income statement, card statements and pending payments."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import the sheets (Movimentacoes.csv, Despesas.csv, Cartoes.csv) from a directory
    Import {
        /// Directory holding the sheet CSV files
        dir: PathBuf,
    },

    /// Report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show the import history
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths, optionally updating settings
    Config {
        /// Card used by `report statement` when none is given
        #[arg(long)]
        default_card: Option<String>,

        /// Currency symbol for terminal output
        #[arg(long)]
        currency_symbol: Option<String>,
    },
}

fn main() -> Result<()> {
    sheetfin::init_tracing();

    let cli = Cli::parse();

    let paths = SheetfinPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Import { dir }) => {
            handle_import_command(&storage, &dir)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Config {
            default_card,
            currency_symbol,
        }) => {
            if default_card.is_some() || currency_symbol.is_some() {
                if let Some(card) = default_card {
                    settings.default_card = Some(card);
                }
                if let Some(symbol) = currency_symbol {
                    settings.currency_symbol = symbol;
                }
                settings.save(&paths)?;
                println!("Settings saved to {}", paths.settings_file().display());
                println!();
            }
            println!("sheetfin Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Default card:    {}",
                settings.default_card.as_deref().unwrap_or("(none)")
            );
        }
        None => {
            println!("sheetfin - reports over a personal-finance spreadsheet");
            println!();
            println!("Run 'sheetfin --help' for usage information.");
            println!("Run 'sheetfin import <dir>' to load your sheets.");
        }
    }

    Ok(())
}
