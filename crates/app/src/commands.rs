use anyhow::{Context, Result};
use ledgerpull_core::RawRow;
use ledgerpull_import::{build_records, clean_dir, load_sources, serialize, Aggregation, RuleEngine, RuleSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractOptions;

/// Reads scraped rows, normalizes them and writes the ledger CSV.
///
/// Everything is built in memory first, so a failed run never creates or
/// truncates the output file. Returns the number of records written.
pub fn run_extract(opts: &ExtractOptions, start_filter_applied: bool) -> Result<usize> {
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("read {}", opts.input.display()))?;
    let rows: Vec<RawRow> = serde_json::from_str(&text)
        .with_context(|| format!("parse scraped rows in {}", opts.input.display()))?;

    let records = build_records(&rows, &opts.config, start_filter_applied)
        .with_context(|| format!("extraction aborted, {} left untouched", opts.output.display()))?;
    let csv = serialize(&records, opts.config.layout)?;

    fs::write(&opts.output, csv).with_context(|| format!("write {}", opts.output.display()))?;
    Ok(records.len())
}

/// Converts downloaded bank CSVs in `input` into ledger files in `output`.
/// Returns the account names.
pub fn run_clean(input: &Path, output: &Path) -> Result<Vec<String>> {
    clean_dir(input, output)
        .with_context(|| format!("clean {} into {}", input.display(), output.display()))
}

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub dir: PathBuf,
    pub file: String,
    pub rules: Option<PathBuf>,
    pub last_import: Option<PathBuf>,
}

impl AggregateOptions {
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(format!("{}.csv", self.file))
    }
}

/// Merges every per-account CSV in `dir` into `<dir>/<file>.csv`.
pub fn run_aggregate(opts: &AggregateOptions) -> Result<Aggregation> {
    let engine = match &opts.rules {
        Some(path) => {
            let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            RuleEngine::from_toml(&s).with_context(|| format!("load rules from {}", path.display()))?
        }
        None => RuleEngine::new(RuleSet::defaults())?,
    };

    let sources = load_sources(&opts.dir, &opts.file)?;
    let agg = ledgerpull_import::aggregate(sources, &engine);

    let out = opts.output_path();
    fs::write(&out, agg.render()?).with_context(|| format!("write {}", out.display()))?;

    if let Some(path) = &opts.last_import {
        fs::write(path, agg.render_last_imported())
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(agg)
}
