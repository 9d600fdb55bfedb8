//! Line input handling
//!
//! Turns one line typed at the prompt into a message for `update`, or into
//! a runtime-only command (show, help). Rows are 1-based at the prompt and
//! 0-based everywhere else.

use std::collections::BTreeMap;

use chrono::Utc;

use ledger_grid::messages::{AppMsg, GridMsg, Msg};
use ledger_grid::model::{ColumnSchema, FieldValue};

pub const HELP: &str = "\
Commands:
  show                          print the table
  click ROW COLUMN              click a cell (COLUMN: id, header or number)
  type TEXT                     replace the text of the cell being edited
  blur                          leave the cell being edited (commits)
  delete ROW                    click the delete button of a row
  add DESC AMOUNT CATEGORY PAY  create a record dated now
  save                          write records to disk
  help                          show this help
  quit                          exit";

/// A parsed prompt line
#[derive(Debug, Clone)]
pub enum Command {
    Msg(Msg),
    Show,
    Help,
    Empty,
}

fn parse_row(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "Missing ROW".to_string())?;
    match arg.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("Invalid row '{}': rows start at 1", arg)),
        Ok(n) => Ok(n - 1),
    }
}

/// Resolve a column by id, header (case-insensitive) or 1-based number
fn parse_column(arg: Option<&str>, schema: &ColumnSchema) -> Result<String, String> {
    let arg = arg.ok_or_else(|| "Missing COLUMN".to_string())?;

    if let Some(col) = schema.find(arg) {
        return Ok(col.id.to_string());
    }
    if let Some(col) = schema
        .columns()
        .iter()
        .find(|c| c.header.eq_ignore_ascii_case(arg) || c.id.as_str().eq_ignore_ascii_case(arg))
    {
        return Ok(col.id.to_string());
    }
    if let Ok(n) = arg.parse::<usize>() {
        if let Some(col) = n.checked_sub(1).and_then(|i| schema.get(i)) {
            return Ok(col.id.to_string());
        }
    }
    Err(format!("Unknown column '{}'", arg))
}

fn parse_add(args: &[&str]) -> Result<BTreeMap<String, FieldValue>, String> {
    let [description, amount, category, payment_method] = args else {
        return Err("Usage: add DESC AMOUNT CATEGORY PAY".to_string());
    };
    let amount = amount
        .parse::<f64>()
        .map(FieldValue::Number)
        .map_err(|_| format!("Invalid amount '{}'", amount))?;

    let mut fields = BTreeMap::new();
    fields.insert("description".to_string(), FieldValue::from(*description));
    fields.insert("amount".to_string(), amount);
    fields.insert("category".to_string(), FieldValue::from(*category));
    fields.insert("paymentMethod".to_string(), FieldValue::from(*payment_method));
    fields.insert("date".to_string(), FieldValue::Date(Utc::now()));
    Ok(fields)
}

/// Parse one prompt line
pub fn parse_command(line: &str, schema: &ColumnSchema) -> Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }

    let (verb, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "click" => {
            let row = parse_row(args.first().copied())?;
            let column = parse_column(args.get(1).copied(), schema)?;
            Command::Msg(Msg::Grid(GridMsg::Click { row, column }))
        }
        // everything after the verb, verbatim, so values may contain spaces
        "type" => Command::Msg(Msg::Grid(GridMsg::Input(rest.trim_start().to_string()))),
        "blur" => Command::Msg(Msg::Grid(GridMsg::Blur)),
        "delete" | "rm" => {
            let row = parse_row(args.first().copied())?;
            Command::Msg(Msg::Grid(GridMsg::DeleteRow(row)))
        }
        "add" => Command::Msg(Msg::App(AppMsg::AddRecord(parse_add(&args)?))),
        "save" => Command::Msg(Msg::App(AppMsg::Save)),
        "quit" | "exit" | "q" => Command::Msg(Msg::App(AppMsg::Quit)),
        other => return Err(format!("Unknown command '{}' (try 'help')", other)),
    };
    Ok(command)
}
