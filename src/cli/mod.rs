mod session;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::application::{AppError, FormConfig, LedgerForm, Notice};
use crate::domain::format_cents;
use crate::storage::DEFAULT_LOG_FILE;

pub use session::{FormAction, parse_action, run_session};

/// Spendlog - balance and expense log
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Keep a running balance and record every expense in a CSV file")]
#[command(version)]
pub struct Cli {
    /// Transaction log file path
    #[arg(short, long, default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// Currency symbol shown in front of the balance
    #[arg(long, default_value = "₹")]
    pub currency: String,

    /// How to print results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the balance with an amount (e.g., "500" or "500.00")
    Set {
        /// New total amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Record an expense against the balance
    Expense {
        /// Amount spent
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show the remaining balance
    Balance,

    /// Copy the transaction log to another file
    Export {
        /// Destination file (nothing is copied if omitted)
        destination: Option<PathBuf>,
    },

    /// Verify that every recorded balance matches a replay of the log
    Check,

    /// Interactive form reading actions from stdin
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What gets printed after an action in JSON mode.
#[derive(Serialize)]
struct FormOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a Notice>,
    balance: String,
    display: String,
}

impl Cli {
    pub fn config(&self) -> FormConfig {
        FormConfig {
            log_path: self.file.clone(),
            currency_symbol: self.currency.clone(),
        }
    }

    pub fn run(self) -> Result<ExitCode> {
        let mut form = LedgerForm::open(self.config()).with_context(|| {
            format!("Failed to load transaction log: {}", self.file.display())
        })?;

        let mut stdout = io::stdout().lock();

        match self.command {
            Commands::Set { amount } => {
                let result = form.set_balance(&amount);
                let notice = Notice::from_result(&result, Notice::recorded);
                print_outcome(&mut stdout, self.format, &form, Some(&notice))?;
                Ok(exit_code(&result))
            }

            Commands::Expense { amount } => {
                let result = form.add_expense(&amount);
                let notice = Notice::from_result(&result, Notice::recorded);
                print_outcome(&mut stdout, self.format, &form, Some(&notice))?;
                Ok(exit_code(&result))
            }

            Commands::Balance => {
                print_outcome(&mut stdout, self.format, &form, None)?;
                Ok(ExitCode::SUCCESS)
            }

            Commands::Export { destination } => {
                let result = form.export_log(destination.as_deref());
                let notice = Notice::from_result(&result, Notice::exported);
                print_outcome(&mut stdout, self.format, &form, Some(&notice))?;
                Ok(exit_code(&result))
            }

            Commands::Check => run_check_command(&form, self.format),

            Commands::Form => {
                let stdin = io::stdin().lock();
                run_session(&mut form, stdin, &mut stdout, self.format)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn exit_code<T>(result: &Result<T, AppError>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print a notice followed by the refreshed balance.
pub(crate) fn print_outcome<W: Write>(
    out: &mut W,
    format: OutputFormat,
    form: &LedgerForm,
    notice: Option<&Notice>,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if let Some(notice) = notice {
                writeln!(out, "{}", notice)?;
            }
            writeln!(out, "{}", form.balance_display())?;
        }
        OutputFormat::Json => {
            let output = FormOutput {
                notice,
                balance: format_cents(form.balance()),
                display: form.balance_display(),
            };
            serde_json::to_writer(&mut *out, &output)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_check_command(form: &LedgerForm, format: OutputFormat) -> Result<ExitCode> {
    let report = form.check_integrity()?;

    if format == OutputFormat::Json {
        let issues: Vec<String> = report.mismatches.iter().map(|m| m.to_string()).collect();
        let json = serde_json::json!({
            "records": report.record_count,
            "set_amount": report.set_amount_count,
            "expenses": report.expense_count,
            "total_spent": format_cents(report.total_spent),
            "balance": format_cents(report.stored_balance),
            "issues": issues,
        });
        println!("{}", json);
    } else {
        println!("Checking ledger integrity...\n");
        println!("Log:          {}", form.log().path().display());
        println!("Records:      {}", report.record_count);
        println!("  Set Amount: {}", report.set_amount_count);
        println!("  Expense:    {}", report.expense_count);
        println!("Total spent:  {:>12}", format_cents(report.total_spent));
        println!("Balance:      {:>12}", format_cents(report.stored_balance));
        println!();

        if report.is_healthy() {
            println!("Ledger is consistent.");
        } else {
            println!("Issues found:");
            for issue in &report.mismatches {
                println!("  - {}", issue);
            }
        }
    }

    if report.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
