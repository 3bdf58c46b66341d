use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::model::{CitationMatch, CitationNumber, Kind};
use crate::normalize::{self, KindClassifier};

mod lines;
pub(crate) mod tokens;

#[cfg(test)]
mod tests;

use lines::line_spans;

/// Scans free-form Czech text for regulation citations: a kind token,
/// an optional informal title fragment, a number marker, the
/// `sequence/year` citation number, and the gazette marker "sb.".
/// Matching runs per physical line; a citation never spans lines.
/// Offsets in the produced matches are byte offsets into the original
/// text, terminators counted at their actual length.
pub struct CitationScanner {
    pattern: Regex,
    unwanted_prefix: Regex,
    amending_tail: Regex,
    classifier: KindClassifier,
    year_pivot: u8,
}

impl CitationScanner {
    pub fn with_year_pivot(year_pivot: u8) -> Result<Self> {
        Ok(Self {
            pattern: tokens::citation_pattern().context("failed to compile citation pattern")?,
            unwanted_prefix: Regex::new(r"(?i)^(?:ve\s+znění|znění|zařízení)\s*")
                .context("failed to compile unwanted-prefix pattern")?,
            amending_tail: Regex::new(r"(?i)\b(?:ve\s+znění|znění|zařízení)$")
                .context("failed to compile amending-tail pattern")?,
            classifier: KindClassifier::new()?,
            year_pivot,
        })
    }

    /// Returns every citation found in `text`, ordered by position.
    /// Pure and stateless: scanning the same text again yields the
    /// same list. Malformed or ambiguous spans are skipped, never an
    /// error.
    pub fn scan(&self, text: &str) -> Vec<CitationMatch> {
        let mut matches = Vec::new();
        for (line, line_start) in line_spans(text) {
            self.scan_line(line, line_start, &mut matches);
        }
        matches
    }

    fn scan_line(&self, line: &str, line_start: usize, out: &mut Vec<CitationMatch>) {
        let mut at = 0;
        while at < line.len() {
            let Some(captures) = self.pattern.captures_at(line, at) else {
                break;
            };
            let Some(whole) = captures.get(0) else {
                break;
            };

            if !left_boundary_ok(line, whole.start()) || !right_boundary_ok(line, whole.end()) {
                at = advance_one_char(line, whole.start());
                continue;
            }

            if let Some(found) = self.resolve_candidate(line, line_start, &captures) {
                out.push(found);
            }
            at = whole.end();
        }
    }

    /// Turns a raw engine match into a citation, or drops it. A span
    /// that begins with an amending phrase ("ve znění" and friends) is
    /// stripped and re-anchored at the first valid kind token; a span
    /// preceded by such a phrase on the same line is discarded as a
    /// reference to an amending version rather than a citation.
    fn resolve_candidate(
        &self,
        line: &str,
        line_start: usize,
        captures: &Captures,
    ) -> Option<CitationMatch> {
        let whole = captures.get(0)?;
        let mut span_start = whole.start();
        let mut span_end = whole.end();
        let mut number = captures.name("number")?.as_str();

        if let Some(prefix) = self.unwanted_prefix.find(&line[span_start..span_end]) {
            let stripped_start = span_start + prefix.end();
            let Some(revalidated) = self.pattern.captures(&line[stripped_start..span_end]) else {
                debug!(
                    rejected = &line[span_start..span_end],
                    "stripped span no longer matches the citation grammar"
                );
                return None;
            };
            let inner = revalidated.get(0)?;
            number = revalidated.name("number")?.as_str();
            span_start = stripped_start + inner.start();
            span_end = stripped_start + inner.end();
        } else if self.amending_tail.is_match(line[..span_start].trim_end()) {
            debug!(
                rejected = &line[span_start..span_end],
                "suppressed citation preceded by an amending phrase"
            );
            return None;
        }

        let raw_text = &line[span_start..span_end];
        let kind = self.classifier.classify(raw_text);
        let (sequence, year) = number.split_once('/')?;

        let canonical_key =
            match normalize::canonical_key_for(kind, sequence, year, self.year_pivot) {
                Ok(key) => Some(key),
                Err(error) => {
                    warn!(raw = raw_text, %error, "citation failed normalization");
                    None
                }
            };

        Some(CitationMatch {
            raw_text: raw_text.to_string(),
            start: line_start + span_start,
            end: line_start + span_end,
            kind,
            number: CitationNumber {
                sequence: sequence.to_string(),
                year: year.to_string(),
            },
            canonical_key,
        })
    }
}

/// Degraded scanner that reports bare `sequence/year` tokens with no
/// kind, marker, or gazette context. Matches carry `Kind::Unknown` and
/// no canonical key; offsets follow the same contract as the full
/// scanner.
pub struct LawNumberScanner {
    pattern: Regex,
}

impl LawNumberScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: tokens::law_number_pattern()
                .context("failed to compile law-number pattern")?,
        })
    }

    pub fn scan(&self, text: &str) -> Vec<CitationMatch> {
        let mut matches = Vec::new();
        for (line, line_start) in line_spans(text) {
            for found in self.pattern.find_iter(line) {
                let Some((sequence, year)) = found.as_str().split_once('/') else {
                    continue;
                };
                matches.push(CitationMatch {
                    raw_text: found.as_str().to_string(),
                    start: line_start + found.start(),
                    end: line_start + found.end(),
                    kind: Kind::Unknown,
                    number: CitationNumber {
                        sequence: sequence.to_string(),
                        year: year.to_string(),
                    },
                    canonical_key: None,
                });
            }
        }
        matches
    }
}

fn left_boundary_ok(line: &str, start: usize) -> bool {
    match line[..start].chars().next_back() {
        None => true,
        Some(character) => character.is_whitespace() || character == ')',
    }
}

fn right_boundary_ok(line: &str, end: usize) -> bool {
    match line[end..].chars().next() {
        None => true,
        Some(character) => !(character.is_alphanumeric() || character == '_'),
    }
}

fn advance_one_char(line: &str, from: usize) -> usize {
    line[from..]
        .chars()
        .next()
        .map(|character| from + character.len_utf8())
        .unwrap_or(line.len())
}
