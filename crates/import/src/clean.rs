use csv::QuoteStyle;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::aggregate::account_from_filename;
use crate::amount::{try_resolve_amount, AmbiguousAmount};
use crate::date::{parse_date, DateParseError};
use crate::ledger::{render_rows, LedgerError, LedgerRow};

/// Date format of the bank's CSV downloads.
pub const BANK_CSV_DATE_FORMAT: &str = "%m/%d/%Y";

/// Fields per line in a downloaded file: date, description, out, in, balance.
pub const BANK_CSV_COLUMNS: usize = 5;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: expected 5 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("Line {line}: {source}")]
    Amount { line: usize, source: AmbiguousAmount },
    #[error("Line {line}: {source}")]
    Date { line: usize, source: DateParseError },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cleaned files must go to a different directory than {}", .0.display())]
    SameDir(PathBuf),
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: Box<CleanError>,
    },
}

/// Converts one downloaded bank CSV into ledger rows for `account`.
///
/// Outflow is negative, the date becomes a ledger date, the fourth column is
/// left empty and the trimmed description goes last.
pub fn clean_bank_csv(text: &str, account: &str) -> Result<Vec<LedgerRow>, CleanError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = idx + 1;

        if record.len() != BANK_CSV_COLUMNS {
            return Err(CleanError::FieldCount { line, found: record.len() });
        }

        let amount = try_resolve_amount(&record[2], &record[3])
            .map_err(|source| CleanError::Amount { line, source })?;
        let date = parse_date(&record[0], BANK_CSV_DATE_FORMAT)
            .map_err(|source| CleanError::Date { line, source })?;

        rows.push(LedgerRow {
            date,
            amount,
            account: account.to_string(),
            description: String::new(),
            detail: record[1].trim().to_string(),
        });
    }
    Ok(rows)
}

/// Cleans every `*.csv` in `input_dir` into a same-named file in `output_dir`.
///
/// All files are converted before anything is written. Stale `*.csv` files in
/// `output_dir` are removed first. Returns the account names, in file-name
/// order.
pub fn clean_dir(input_dir: &Path, output_dir: &Path) -> Result<Vec<String>, CleanError> {
    if input_dir == output_dir {
        return Err(CleanError::SameDir(input_dir.to_path_buf()));
    }
    let mut names = csv_file_names(input_dir).map_err(io_error(input_dir))?;
    names.sort();

    let mut cleaned = Vec::with_capacity(names.len());
    for name in &names {
        let path = input_dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        let account = account_from_filename(name);
        let rendered = clean_bank_csv(&text, &account)
            .and_then(|rows| {
                tracing::info!(file = %name, rows = rows.len(), "cleaned bank file");
                Ok(render_rows(&rows, QuoteStyle::NonNumeric)?)
            })
            .map_err(|source| CleanError::File {
                path: path.clone(),
                source: Box::new(source),
            })?;
        cleaned.push((name, account, rendered));
    }

    std::fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;
    for stale in csv_file_names(output_dir).map_err(io_error(output_dir))? {
        let path = output_dir.join(stale);
        std::fs::remove_file(&path).map_err(io_error(&path))?;
    }

    let mut accounts = Vec::with_capacity(cleaned.len());
    for (name, account, rendered) in cleaned {
        let path = output_dir.join(name);
        std::fs::write(&path, rendered).map_err(io_error(&path))?;
        accounts.push(account);
    }
    Ok(accounts)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CleanError {
    let path = path.to_path_buf();
    move |source| CleanError::Io { path, source }
}

fn csv_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    Ok(std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".csv"))
        .collect())
}
