use chrono::NaiveDate;
use csv::QuoteStyle;
use ledgerpull_core::LEDGER_DATE_FORMAT;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ledger::{parse_ledger, render_rows, LedgerError, LedgerRow};
use crate::rules::RuleEngine;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Ledger { path: PathBuf, source: LedgerError },
}

/// `assets-chequing.csv` → `assets:chequing`.
pub fn account_from_filename(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
    stem.replace('-', ":")
}

/// One per-account ledger file.
#[derive(Debug, Clone)]
pub struct LedgerSource {
    pub account: String,
    pub rows: Vec<LedgerRow>,
}

#[derive(Debug, Default)]
pub struct Aggregation {
    /// Surviving rows, sorted by date (stable across sources).
    pub rows: Vec<LedgerRow>,
    pub accounts: Vec<String>,
    pub zero: usize,
    pub excluded: usize,
    pub rewritten: usize,
}

impl Aggregation {
    pub fn render(&self) -> Result<String, LedgerError> {
        render_rows(&self.rows, QuoteStyle::Always)
    }

    /// Latest date per account among the surviving rows.
    pub fn last_imported(&self) -> BTreeMap<&str, NaiveDate> {
        let mut latest: BTreeMap<&str, NaiveDate> = BTreeMap::new();
        for row in &self.rows {
            latest
                .entry(row.account.as_str())
                .and_modify(|d| *d = (*d).max(row.date))
                .or_insert(row.date);
        }
        latest
    }

    /// `<account> <YYYY/MM/DD>` per line.
    pub fn render_last_imported(&self) -> String {
        self.last_imported()
            .into_iter()
            .map(|(account, date)| format!("{account} {}\n", date.format(LEDGER_DATE_FORMAT)))
            .collect()
    }
}

/// Merges per-account sources: stamps the account, trims text, drops zero
/// amounts and excluded transfers, applies rewrites, then sorts by date.
pub fn aggregate(sources: Vec<LedgerSource>, engine: &RuleEngine) -> Aggregation {
    let mut out = Aggregation::default();

    for source in sources {
        for mut row in source.rows {
            row.account = source.account.clone();
            row.description = row.description.trim().to_string();
            row.detail = row.detail.trim().to_string();

            if row.amount.is_zero() {
                out.zero += 1;
                continue;
            }
            if let Some(rule) = engine.excluded_by(&row) {
                tracing::debug!(rule = %rule.name, account = %row.account, "excluding row");
                out.excluded += 1;
                continue;
            }
            if engine.rewrite(&mut row) {
                out.rewritten += 1;
            }
            out.rows.push(row);
        }
        out.accounts.push(source.account);
    }

    out.rows.sort_by_key(|r| r.date);
    out
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AggregateError {
    let path = path.to_path_buf();
    move |source| AggregateError::Io { path, source }
}

/// Reads every `*.csv` in `dir` except the aggregate itself (any file whose
/// name starts with `output_name`), in file-name order.
pub fn load_sources(dir: &Path, output_name: &str) -> Result<Vec<LedgerSource>, AggregateError> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(io_error(dir))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".csv") && !name.starts_with(output_name))
        .collect();
    names.sort();

    let mut sources = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let text = std::fs::read_to_string(&path).map_err(io_error(&path))?;
        let rows = parse_ledger(&text).map_err(|source| AggregateError::Ledger {
            path: path.clone(),
            source,
        })?;
        tracing::info!(file = %name, rows = rows.len(), "loaded ledger file");
        sources.push(LedgerSource {
            account: account_from_filename(&name),
            rows,
        });
    }
    Ok(sources)
}
