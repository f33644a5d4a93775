pub mod layout;
pub mod money;
pub mod record;
pub mod row;

pub use layout::{AccountLayout, ColumnMap};
pub use money::{format_amount, parse_amount};
pub use record::{CanonicalRecord, ExtractionConfig, DEFAULT_SOURCE_DATE_FORMAT, LEDGER_DATE_FORMAT};
pub use row::{is_transactional, RawRow, STATEMENT_MARKERS};
