use serde::{Deserialize, Serialize};

/// Class tags the bank UI puts on statement header, break and
/// current-period rows between real transactions.
pub const STATEMENT_MARKERS: &[&str] = &["stmt", "stmt-brk", "stmt-currprd"];

/// One scraped table row: cell text in column order plus the row's class tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl RawRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawRow {
            cells: cells.into_iter().map(Into::into).collect(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn cell(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).map(String::as_str)
    }
}

/// A row is a transaction unless one of its class tags is a statement marker.
/// A tag may hold several space-separated classes (a raw `className`).
pub fn is_transactional(row: &RawRow) -> bool {
    !row
        .classes
        .iter()
        .flat_map(|c| c.split_whitespace())
        .any(|c| STATEMENT_MARKERS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_row_is_transactional() {
        assert!(is_transactional(&RawRow::new(["Jan. 5, 2019", "1.00"])));
    }

    #[test]
    fn statement_markers_are_excluded() {
        for marker in STATEMENT_MARKERS {
            let row = RawRow::new(["Statement"]).with_class(marker);
            assert!(!is_transactional(&row), "{marker} should be excluded");
        }
    }

    #[test]
    fn unrelated_classes_are_kept() {
        let row = RawRow::new(["x"]).with_class("odd").with_class("stmt-row-hover");
        assert!(is_transactional(&row));
    }

    #[test]
    fn space_separated_class_name() {
        let row = RawRow::new(["x"]).with_class("odd stmt-brk");
        assert!(!is_transactional(&row));
    }

    #[test]
    fn deserialize_without_classes() {
        let row: RawRow = serde_json::from_str(r#"{"cells": ["a", "b"]}"#).unwrap();
        assert_eq!(row.cells, vec!["a", "b"]);
        assert!(row.classes.is_empty());
        assert_eq!(row.cell(1), Some("b"));
        assert_eq!(row.cell(2), None);
    }
}
