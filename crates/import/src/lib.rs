pub mod aggregate;
pub mod amount;
pub mod clean;
pub mod date;
pub mod extract;
pub mod ledger;
pub mod rules;

pub use aggregate::{account_from_filename, aggregate, load_sources, AggregateError, Aggregation, LedgerSource};
pub use amount::{resolve_amount, try_resolve_amount, AmbiguousAmount};
pub use clean::{clean_bank_csv, clean_dir, CleanError, BANK_CSV_COLUMNS, BANK_CSV_DATE_FORMAT};
pub use date::{normalize_date, parse_date, DateParseError};
pub use extract::{build_records, ExtractError};
pub use ledger::{parse_ledger, record_fields, render_rows, serialize, LedgerError, LedgerRow, LEDGER_COLUMNS};
pub use rules::{Column, ExcludeRule, MatchType, RewriteRule, RuleEngine, RuleSet, RulesError};
