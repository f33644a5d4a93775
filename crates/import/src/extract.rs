use ledgerpull_core::{is_transactional, AccountLayout, CanonicalRecord, ExtractionConfig, RawRow};
use thiserror::Error;

use crate::amount::resolve_amount;
use crate::date::{normalize_date, DateParseError};

/// Failures that abort a whole extraction run. `row` is the 0-based index in
/// the scraped input.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Row {row} ({layout} layout): expected at least {expected} cells, found {found}")]
    MalformedRow {
        row: usize,
        layout: AccountLayout,
        expected: usize,
        found: usize,
    },
    #[error("Row {row} ({layout} layout): {source}")]
    DateParse {
        row: usize,
        layout: AccountLayout,
        source: DateParseError,
    },
}

/// Turns scraped rows into canonical records, in input order.
///
/// Statement marker rows and rows whose amount resolves to zero are dropped.
/// `start_filter_applied` reports whether the scraper already narrowed the
/// rows to `config.start_date`; rows are never re-filtered here.
pub fn build_records(
    rows: &[RawRow],
    config: &ExtractionConfig,
    start_filter_applied: bool,
) -> Result<Vec<CanonicalRecord>, ExtractError> {
    if let (Some(start), false) = (config.start_date, start_filter_applied) {
        tracing::warn!(
            %start,
            "start date was not applied by the scraper; rows before it are kept"
        );
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut markers = 0usize;
    let mut zero = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        if !is_transactional(row) {
            markers += 1;
            continue;
        }
        match build_record(idx, row, config)? {
            Some(record) => records.push(record),
            None => zero += 1,
        }
    }

    tracing::info!(
        layout = %config.layout,
        account = %config.account_name,
        records = records.len(),
        markers,
        zero,
        "extracted records"
    );
    Ok(records)
}

fn build_record(
    idx: usize,
    row: &RawRow,
    config: &ExtractionConfig,
) -> Result<Option<CanonicalRecord>, ExtractError> {
    let layout = config.layout;
    let cols = layout.columns();

    if row.cells.len() < cols.width() {
        return Err(ExtractError::MalformedRow {
            row: idx,
            layout,
            expected: cols.width(),
            found: row.cells.len(),
        });
    }
    let cell = |i: usize| row.cells[i].as_str();

    let amount = resolve_amount(cell(cols.outflow), cell(cols.inflow));
    if amount.is_zero() {
        tracing::debug!(row = idx, "dropping zero-amount row");
        return Ok(None);
    }

    let date = normalize_date(
        cell(cols.date),
        &config.source_date_format,
        &config.output_date_format,
    )
    .map_err(|source| ExtractError::DateParse {
        row: idx,
        layout,
        source,
    })?;

    let (description, secondary) = if layout.has_secondary() {
        split_description(cell(cols.description))
    } else {
        (cell(cols.description).trim().to_string(), None)
    };

    Ok(Some(CanonicalRecord {
        date,
        amount,
        account: config.account_name.clone(),
        description,
        secondary,
    }))
}

/// First line is the description; remaining non-blank lines form the
/// secondary field, joined by a space. Lines past the second are folded in
/// too, not dropped.
fn split_description(text: &str) -> (String, Option<String>) {
    let text = text.trim();
    match text.split_once('\n') {
        Some((first, rest)) => {
            let rest = rest
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (first.trim().to_string(), (!rest.is_empty()).then_some(rest))
        }
        None => (text.to_string(), None),
    }
}
