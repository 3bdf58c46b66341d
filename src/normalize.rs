use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

use crate::model::Kind;
use crate::scanner::tokens::KIND_TOKENS;

/// Two-digit years strictly above the pivot expand to 19xx, the rest
/// to 20xx. 70 keeps every gazette year since 1971 stable; citations
/// to earlier decades need a caller-supplied pivot.
pub const DEFAULT_YEAR_PIVOT: u8 = 70;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("citation kind could not be determined")]
    UnknownKind,
    #[error("citation year has {0} digits, expected 2 or 4")]
    InvalidYearDigitCount(usize),
    #[error("citation number is not of the form <sequence>/<year>: {0}")]
    MalformedNumber(String),
}

/// Classifies the regulation kind from the literal prefix of a raw
/// matched span. Kinds are tried in the fixed order of the token
/// table; the first anchored pattern that matches wins, so callers
/// must pass the full span, not a trimmed fragment.
pub struct KindClassifier {
    patterns: Vec<(Kind, Regex)>,
}

impl KindClassifier {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(KIND_TOKENS.len());
        for (kind, alternatives) in KIND_TOKENS {
            let pattern = format!("(?i)^(?:{})", alternatives.join("|"));
            let compiled = Regex::new(&pattern)
                .with_context(|| format!("failed to compile {} classifier", kind.as_str()))?;
            patterns.push((*kind, compiled));
        }
        Ok(Self { patterns })
    }

    pub fn classify(&self, raw_span: &str) -> Kind {
        for (kind, pattern) in &self.patterns {
            if pattern.is_match(raw_span) {
                return *kind;
            }
        }
        Kind::Unknown
    }
}

/// Expands the year half of a `sequence/year` citation number to four
/// digits and returns the full normalized number.
pub fn normalize_year(number: &str, pivot: u8) -> Result<String, NormalizeError> {
    let (sequence, year) = number
        .split_once('/')
        .ok_or_else(|| NormalizeError::MalformedNumber(number.to_string()))?;
    let expanded = expand_year(year, pivot)?;
    Ok(format!("{sequence}/{expanded}"))
}

pub fn expand_year(year: &str, pivot: u8) -> Result<String, NormalizeError> {
    if year.is_empty() || !year.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(NormalizeError::MalformedNumber(year.to_string()));
    }

    match year.len() {
        4 => Ok(year.to_string()),
        2 => {
            let value = year
                .parse::<u8>()
                .map_err(|_| NormalizeError::MalformedNumber(year.to_string()))?;
            if value > pivot {
                Ok(format!("19{year}"))
            } else {
                Ok(format!("20{year}"))
            }
        }
        count => Err(NormalizeError::InvalidYearDigitCount(count)),
    }
}

/// Builds the canonical lowercase identity of a citation from already
/// normalized parts. Every spelling variant of the same regulation
/// collapses to the same key.
pub fn canonical_key(kind: Kind, sequence: &str, year: &str) -> Result<String, NormalizeError> {
    let prefix = kind.canonical_prefix().ok_or(NormalizeError::UnknownKind)?;
    Ok(format!("{prefix} c. {sequence}/{year} sb."))
}

pub fn canonical_key_for(
    kind: Kind,
    sequence: &str,
    year: &str,
    pivot: u8,
) -> Result<String, NormalizeError> {
    let expanded = expand_year(year, pivot)?;
    canonical_key(kind, sequence, &expanded)
}
