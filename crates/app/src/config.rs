use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use ledgerpull_core::{AccountLayout, ExtractionConfig, LEDGER_DATE_FORMAT};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Answers file (TOML): defaults for anything not passed on the command line.
/// Unknown keys (e.g. credentials used by the scraper) are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub account_type: Option<AccountLayout>,
    pub account_name: Option<String>,
    pub filename: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub start: Option<String>,
    pub date_format: Option<String>,
}

impl Answers {
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }
}

/// Extract flags exactly as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ExtractFlags {
    pub layout: Option<AccountLayout>,
    pub account_name: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub start: Option<String>,
    pub date_format: Option<String>,
}

#[derive(Debug)]
pub struct ExtractOptions {
    pub config: ExtractionConfig,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ExtractOptions {
    /// Flags win over answers; the result is validated before any file is touched.
    pub fn resolve(flags: ExtractFlags, answers: Answers) -> Result<Self> {
        let layout = flags
            .layout
            .or(answers.account_type)
            .context("account type is required (--account-type chequing|visa)")?;
        let account_name = flags
            .account_name
            .or(answers.account_name)
            .filter(|s| !s.trim().is_empty())
            .context("account name is required (--account-name)")?;
        let output = flags
            .output
            .or(answers.filename)
            .context("output filename is required (--filename)")?;
        let input = flags
            .input
            .or(answers.input)
            .context("scraped rows file is required (--input)")?;
        let start = flags
            .start
            .or(answers.start)
            .map(|s| parse_start(&s))
            .transpose()?;

        let mut config = ExtractionConfig::new(layout, account_name.trim()).with_start_date(start);
        if let Some(format) = flags.date_format.or(answers.date_format) {
            config = config.with_source_date_format(&format);
        }

        Ok(ExtractOptions { config, input, output })
    }
}

/// `--start` must be `YYYY/MM/DD` and a real calendar date.
pub fn parse_start(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let shape = Regex::new(r"^\d{4}/\d{2}/\d{2}$")?;
    if !shape.is_match(s) {
        bail!("start date '{s}' must look like YYYY/MM/DD");
    }
    NaiveDate::parse_from_str(s, LEDGER_DATE_FORMAT)
        .with_context(|| format!("start date '{s}' is not a valid date"))
}
