//! CLI commands for reports
//!
//! Every report prints to the terminal by default, exports CSV with
//! `--output`, or prints its data as JSON with `--json`.

use crate::config::settings::Settings;
use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{Dataset, ReportPeriod};
use crate::reports::{
    current_pending_total, AnnualCardView, CardStatement, ClassificationReport, IncomeStatement,
    MonthlySummary, MovementList, PendingReport, WeeklyBudgetReport,
};
use crate::storage::Storage;
use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Output options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the report data as JSON
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Receipts, expenses and balance of a month (by payment date)
    Summary {
        /// Month to report on (e.g., "2024-03")
        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Category limits against spending, split by week
    Weekly {
        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Planned versus actual per classification
    #[command(alias = "classes")]
    Classification {
        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Annual income statement (DRE)
    #[command(alias = "income")]
    Dre {
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Statement of one card for one billing month
    Statement {
        /// Card name; defaults to the configured default card
        card: Option<String>,

        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Paid and pending card spending per month of a year
    Cards {
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Pending expenses per category and month of a year
    Pending {
        #[arg(short, long)]
        year: Option<i32>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Transactions incurred in a month
    #[command(alias = "movs")]
    Movements {
        #[arg(short, long)]
        period: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Category limits and cards as imported
    Limits {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SheetfinResult<()> {
    let dataset = storage.load_dataset()?;
    if dataset.transactions.is_empty() {
        tracing::warn!("no transactions stored; run `sheetfin import <dir>` first");
    }
    let today = chrono::Local::now().date_naive();

    match cmd {
        ReportCommands::Summary { period, out } => {
            let period = resolve_period(period, today)?;
            let report = MonthlySummary::generate(&dataset.transactions, period);
            emit(&report, &out, "Summary", MonthlySummary::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Weekly { period, out } => {
            let period = resolve_period(period, today)?;
            let report =
                WeeklyBudgetReport::generate(&dataset.transactions, &dataset.category_limits, period);
            emit(&report, &out, "Weekly budget", WeeklyBudgetReport::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Classification { period, out } => {
            let period = resolve_period(period, today)?;
            let report = ClassificationReport::generate(
                &dataset.transactions,
                &dataset.category_limits,
                period,
            );
            emit(
                &report,
                &out,
                "Classification",
                ClassificationReport::format_terminal,
                |r, w| r.export_csv(w),
            )
        }
        ReportCommands::Dre { year, out } => {
            let year = year.unwrap_or_else(|| today.year());
            let report = IncomeStatement::generate(&dataset.transactions, year);
            emit(&report, &out, "Income statement", IncomeStatement::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Statement { card, period, out } => {
            let period = resolve_period(period, today)?;
            let card = resolve_card(&dataset, settings, card)?;
            let report = CardStatement::generate(&dataset.transactions, &card, period);
            emit(&report, &out, "Card statement", CardStatement::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Cards { year, out } => {
            let year = year.unwrap_or_else(|| today.year());
            let report = AnnualCardView::generate(&dataset.transactions, &dataset.cards, year);
            emit(&report, &out, "Card view", AnnualCardView::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Pending { year, out } => {
            let year = year.unwrap_or_else(|| today.year());
            let report = PendingReport::generate(&dataset.transactions, year);
            emit(&report, &out, "Pending", PendingReport::format_terminal, |r, w| {
                r.export_csv(w)
            })?;
            if !out.json && out.output.is_none() {
                let due = current_pending_total(&dataset.transactions, today);
                println!(
                    "Pending as of {}: {}",
                    settings.format_date(today)?,
                    due.format_with_symbol(&settings.currency_symbol)
                );
            }
            Ok(())
        }
        ReportCommands::Movements { period, out } => {
            let period = resolve_period(period, today)?;
            let report = MovementList::generate(&dataset.transactions, period);
            emit(&report, &out, "Movements", MovementList::format_terminal, |r, w| {
                r.export_csv(w)
            })
        }
        ReportCommands::Limits { json } => {
            if json {
                #[derive(Serialize)]
                struct Limits<'a> {
                    category_limits: &'a [crate::models::CategoryLimit],
                    cards: &'a [crate::models::Card],
                }
                let limits = Limits {
                    category_limits: &dataset.category_limits,
                    cards: &dataset.cards,
                };
                print_json(&limits)
            } else {
                println!("{}", crate::display::format_limit_list(&dataset.category_limits));
                println!("{}", crate::display::format_card_list(&dataset.cards));
                Ok(())
            }
        }
    }
}

/// Parse `--period`, defaulting to the current month
fn resolve_period(period: Option<String>, today: NaiveDate) -> SheetfinResult<ReportPeriod> {
    match period {
        Some(period_str) => ReportPeriod::parse(&period_str).map_err(|e| {
            SheetfinError::Validation(format!(
                "{}. Use YYYY-MM (e.g., 2024-03)",
                e
            ))
        }),
        None => Ok(ReportPeriod::current(today)),
    }
}

/// The card named on the command line, else the configured default
fn resolve_card(
    dataset: &Dataset,
    settings: &Settings,
    card: Option<String>,
) -> SheetfinResult<String> {
    let name = card.or_else(|| settings.default_card.clone()).ok_or_else(|| {
        SheetfinError::Validation(
            "No card given and no default_card configured".to_string(),
        )
    })?;

    dataset
        .card(&name)
        .map(|c| c.name.clone())
        .ok_or_else(|| SheetfinError::card_not_found(name))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> SheetfinResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print, export or serialize a generated report
fn emit<R, F, E>(
    report: &R,
    out: &OutputArgs,
    name: &str,
    format_terminal: F,
    export_csv: E,
) -> SheetfinResult<()>
where
    R: Serialize,
    F: FnOnce(&R) -> String,
    E: FnOnce(&R, &mut BufWriter<File>) -> SheetfinResult<()>,
{
    if out.json {
        return print_json(report);
    }

    if let Some(path) = &out.output {
        let file = File::create(path).map_err(|e| {
            SheetfinError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        export_csv(report, &mut writer)?;
        writer
            .flush()
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        println!("{} report exported to: {}", name, path.display());
    } else {
        println!("{}", format_terminal(report));
    }

    Ok(())
}
