use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::LedgerRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Contains,
    Exact,
    Regex,
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(MatchType::Contains),
            "exact" => Ok(MatchType::Exact),
            "regex" => Ok(MatchType::Regex),
            other => Err(format!("Unknown match type: '{other}'")),
        }
    }
}

/// Which text column a rule looks at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Description,
    #[default]
    Detail,
    Any,
}

/// Drops rows of matching accounts, typically the receiving side of a
/// transfer that already shows up in the sending account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeRule {
    pub name: String,
    pub account_contains: String,
    #[serde(default)]
    pub column: Column,
    pub pattern: String,
    #[serde(default)]
    pub match_type: MatchType,
}

/// Replaces the whole description when it matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    #[serde(default)]
    pub match_type: MatchType,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub exclude: Vec<ExcludeRule>,
    #[serde(default)]
    pub rewrite: Vec<RewriteRule>,
}

impl RuleSet {
    /// Transfer filters and the GST rename for Scotiabank chequing, savings
    /// and credit accounts.
    pub fn defaults() -> Self {
        let exclude = |name: &str, account: &str, column: Column, pattern: &str| ExcludeRule {
            name: name.to_string(),
            account_contains: account.to_string(),
            column,
            pattern: pattern.to_string(),
            match_type: MatchType::Contains,
        };
        RuleSet {
            exclude: vec![
                exclude("savings transfer in", "chequing", Column::Detail, "PC FROM"),
                exclude("customer transfer", "chequing", Column::Description, "Customer Transfer Cr."),
                exclude("bank the rest", "savings", Column::Detail, "BANK THE REST"),
                exclude("chequing transfer in", "savings", Column::Detail, "PC FROM"),
                exclude("card payment", "credit", Column::Detail, "CREDIT CARD/LOC PAY. FROM"),
                exclude("online payment", "credit", Column::Detail, "PC - PAYMENT FROM"),
                exclude("payment thank you", "credit", Column::Detail, "PAYMENT-THANK YOU SCOTIABANK"),
            ],
            rewrite: vec![RewriteRule {
                pattern: "GST".to_string(),
                match_type: MatchType::Contains,
                replacement: "GST Credit".to_string(),
            }],
        }
    }
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to parse rules TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid regex '{pattern}': {source}")]
    Regex {
        pattern: String,
        source: regex::Error,
    },
}

/// A pattern with its lowercased form and precompiled regex (if applicable).
struct Matcher {
    lowered: String,
    match_type: MatchType,
    regex: Option<regex::Regex>,
}

impl Matcher {
    fn new(pattern: &str, match_type: &MatchType) -> Result<Self, RulesError> {
        let regex = match match_type {
            MatchType::Regex => Some(regex::Regex::new(pattern).map_err(|source| {
                RulesError::Regex {
                    pattern: pattern.to_string(),
                    source,
                }
            })?),
            _ => None,
        };
        Ok(Matcher {
            lowered: pattern.to_lowercase(),
            match_type: match_type.clone(),
            regex,
        })
    }

    fn is_match(&self, text: &str) -> bool {
        match self.match_type {
            MatchType::Contains => text.to_lowercase().contains(&self.lowered),
            MatchType::Exact => text.trim().to_lowercase() == self.lowered,
            MatchType::Regex => self.regex.as_ref().is_some_and(|re| re.is_match(text)),
        }
    }
}

pub struct RuleEngine {
    exclude: Vec<(ExcludeRule, Matcher)>,
    rewrite: Vec<(RewriteRule, Matcher)>,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Result<Self, RulesError> {
        let exclude = rules
            .exclude
            .into_iter()
            .map(|r| Matcher::new(&r.pattern, &r.match_type).map(|m| (r, m)))
            .collect::<Result<Vec<_>, _>>()?;
        let rewrite = rules
            .rewrite
            .into_iter()
            .map(|r| Matcher::new(&r.pattern, &r.match_type).map(|m| (r, m)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { exclude, rewrite })
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, RulesError> {
        let rules: RuleSet = toml::from_str(toml_content)?;
        Self::new(rules)
    }

    /// The first exclusion rule that applies to `row`, if any.
    pub fn excluded_by(&self, row: &LedgerRow) -> Option<&ExcludeRule> {
        let account = row.account.to_lowercase();
        self.exclude
            .iter()
            .filter(|(rule, _)| account.contains(&rule.account_contains.to_lowercase()))
            .find(|(rule, matcher)| match rule.column {
                Column::Description => matcher.is_match(&row.description),
                Column::Detail => matcher.is_match(&row.detail),
                Column::Any => matcher.is_match(&row.description) || matcher.is_match(&row.detail),
            })
            .map(|(rule, _)| rule)
    }

    /// Applies the first matching rewrite to the description. Returns whether
    /// anything changed.
    pub fn rewrite(&self, row: &mut LedgerRow) -> bool {
        match self.rewrite.iter().find(|(_, m)| m.is_match(&row.description)) {
            Some((rule, _)) if row.description != rule.replacement => {
                row.description = rule.replacement.clone();
                true
            }
            _ => false,
        }
    }
}
