use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::application::{LedgerForm, Notice};

use super::{OutputFormat, print_outcome};

const HELP: &str = "\
Actions:
  set <amount>      replace the total amount
  spend <amount>    record an expense
  balance           show the remaining balance
  export [path]     copy the transaction log to path
  help              show this text
  quit              leave the form";

/// One line of input to the interactive form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Set(String),
    Spend(String),
    Balance,
    Export(Option<PathBuf>),
    Help,
    Quit,
    Unknown(String),
}

/// Parse a line typed into the form. Blank lines yield `None`.
pub fn parse_action(line: &str) -> Option<FormAction> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match verb.to_lowercase().as_str() {
        "set" => FormAction::Set(rest.to_string()),
        "spend" | "expense" => FormAction::Spend(rest.to_string()),
        "balance" => FormAction::Balance,
        "export" | "download" => {
            FormAction::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))
        }
        "help" | "?" => FormAction::Help,
        "quit" | "exit" => FormAction::Quit,
        _ => FormAction::Unknown(verb.to_string()),
    };
    Some(action)
}

/// Drive a form from line-oriented input until `quit` or end of input.
///
/// Every action is answered with a notice and the refreshed balance; a
/// failed action never ends the session.
pub fn run_session<R, W>(
    form: &mut LedgerForm,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    if format == OutputFormat::Text {
        writeln!(output, "Type 'help' for the list of actions.")?;
    }
    print_outcome(&mut output, format, form, None)?;

    for line in input.lines() {
        let line = line?;
        let Some(action) = parse_action(&line) else {
            continue;
        };
        tracing::debug!(?action, "form action");

        let notice = match action {
            FormAction::Set(amount) => {
                Notice::from_result(&form.set_balance(&amount), Notice::recorded)
            }
            FormAction::Spend(amount) => {
                Notice::from_result(&form.add_expense(&amount), Notice::recorded)
            }
            FormAction::Export(destination) => {
                Notice::from_result(&form.export_log(destination.as_deref()), Notice::exported)
            }
            FormAction::Balance => {
                print_outcome(&mut output, format, form, None)?;
                continue;
            }
            FormAction::Help => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            FormAction::Quit => break,
            FormAction::Unknown(verb) => {
                writeln!(output, "Unknown action '{}'. Type 'help' for the list.", verb)?;
                continue;
            }
        };

        print_outcome(&mut output, format, form, Some(&notice))?;
    }

    Ok(())
}
