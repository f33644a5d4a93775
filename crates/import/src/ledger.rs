use chrono::NaiveDate;
use csv::QuoteStyle;
use ledgerpull_core::{format_amount, AccountLayout, CanonicalRecord, LEDGER_DATE_FORMAT};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Every ledger line has exactly this many fields, whatever the layout.
pub const LEDGER_COLUMNS: usize = 5;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Ledger output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Line {line}: expected 5 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("Line {line}: invalid date '{value}'")]
    InvalidDate { line: usize, value: String },
    #[error("Line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },
}

/// One line of a ledger CSV, read back from disk.
///
/// Deposit files put the description in `description` and the second line in
/// `detail`; credit card files leave `description` empty and use `detail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub account: String,
    pub description: String,
    pub detail: String,
}

impl LedgerRow {
    fn fields(&self) -> [String; LEDGER_COLUMNS] {
        [
            self.date.format(LEDGER_DATE_FORMAT).to_string(),
            format_amount(self.amount),
            self.account.clone(),
            self.description.clone(),
            self.detail.clone(),
        ]
    }
}

/// Column values for one record under `layout`.
pub fn record_fields(record: &CanonicalRecord, layout: AccountLayout) -> [String; LEDGER_COLUMNS] {
    let (fourth, fifth) = match layout {
        AccountLayout::Deposit => (
            record.description.clone(),
            record.secondary.clone().unwrap_or_default(),
        ),
        AccountLayout::CreditCard => (String::new(), record.description.clone()),
    };
    [
        record.date.clone(),
        format_amount(record.amount),
        record.account.clone(),
        fourth,
        fifth,
    ]
}

/// Renders records as header-less CSV, one `\n`-terminated line each.
/// Fields are quoted only when they contain a comma, quote or line break.
pub fn serialize(records: &[CanonicalRecord], layout: AccountLayout) -> Result<String, LedgerError> {
    write_lines(records.iter().map(|r| record_fields(r, layout)), QuoteStyle::Necessary)
}

/// Renders parsed rows; the aggregate file quotes every field.
pub fn render_rows(rows: &[LedgerRow], quote_style: QuoteStyle) -> Result<String, LedgerError> {
    write_lines(rows.iter().map(LedgerRow::fields), quote_style)
}

fn write_lines<I>(lines: I, quote_style: QuoteStyle) -> Result<String, LedgerError>
where
    I: IntoIterator<Item = [String; LEDGER_COLUMNS]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(quote_style)
        .from_writer(Vec::new());
    for fields in lines {
        writer.write_record(&fields)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Parses a header-less 5-column ledger CSV.
pub fn parse_ledger(text: &str) -> Result<Vec<LedgerRow>, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = idx + 1;

        if record.len() != LEDGER_COLUMNS {
            return Err(LedgerError::FieldCount { line, found: record.len() });
        }

        let date_str = record[0].trim();
        let date = NaiveDate::parse_from_str(date_str, LEDGER_DATE_FORMAT).map_err(|_| {
            LedgerError::InvalidDate {
                line,
                value: date_str.to_string(),
            }
        })?;

        let amount_str = record[1].trim();
        let amount = Decimal::from_str(amount_str).map_err(|_| LedgerError::InvalidAmount {
            line,
            value: amount_str.to_string(),
        })?;

        rows.push(LedgerRow {
            date,
            amount,
            account: record[2].to_string(),
            description: record[3].to_string(),
            detail: record[4].to_string(),
        });
    }
    Ok(rows)
}
