use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

use crate::model::LookupKey;

/// All Czech-law kinds share one collection namespace in the external
/// legal database.
pub const CZECH_COLLECTION: &str = "cs";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("canonical key does not match \"<prefix> c. <sequence>/<year> sb.\": {key}")]
pub struct MalformedCitation {
    pub key: String,
}

/// Parses canonical keys into the `{collection, document}` pair the
/// external lookup API expects. This is the gate in front of every
/// lookup call: a key that does not conform fails here, per citation,
/// without affecting the rest of a scan. Only statutes, decrees, and
/// government regulations exist in the external collection; notices
/// and anything else are rejected.
pub struct CanonicalKeyParser {
    pattern: Regex,
}

impl CanonicalKeyParser {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(
            r"(?i)^(?:n\.v\.|z\.|v\.)\s*c\.\s*(?P<sequence>\d{1,4})/(?P<year>\d{4})\s*sb\.$",
        )
        .context("failed to compile canonical-key pattern")?;
        Ok(Self { pattern })
    }

    pub fn to_lookup_key(&self, canonical_key: &str) -> Result<LookupKey, MalformedCitation> {
        let malformed = || MalformedCitation {
            key: canonical_key.to_string(),
        };

        let captures = self
            .pattern
            .captures(canonical_key.trim())
            .ok_or_else(malformed)?;
        let sequence = captures.name("sequence").ok_or_else(malformed)?.as_str();
        let year = captures.name("year").ok_or_else(malformed)?.as_str();

        Ok(LookupKey {
            collection: CZECH_COLLECTION.to_string(),
            document: format!("{year}-{sequence}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keys_map_to_czech_collection_documents() {
        let parser = CanonicalKeyParser::new().expect("parser compiles");

        let lookup = parser.to_lookup_key("n.v. c. 589/2006 sb.").expect("valid key");
        assert_eq!(lookup.collection, "cs");
        assert_eq!(lookup.document, "2006-589");

        let lookup = parser.to_lookup_key("z. c. 89/2012 sb.").expect("valid key");
        assert_eq!(lookup.document, "2012-89");

        let lookup = parser.to_lookup_key("v. c. 4/2001 sb.").expect("valid key");
        assert_eq!(lookup.document, "2001-4");
    }

    #[test]
    fn sequence_digits_are_preserved_verbatim() {
        let parser = CanonicalKeyParser::new().expect("parser compiles");

        let lookup = parser.to_lookup_key("v. c. 05/1991 sb.").expect("valid key");
        assert_eq!(lookup.document, "1991-05");
    }

    #[test]
    fn nonconforming_keys_are_rejected() {
        let parser = CanonicalKeyParser::new().expect("parser compiles");
        let keys = [
            "s. c. 278/2020 sb.",
            "z. c. 89/12 sb.",
            "z. c. 89/2012",
            "zákon č. 89/2012 Sb.",
            "",
        ];

        for key in keys {
            assert!(parser.to_lookup_key(key).is_err(), "accepted {key:?}");
        }
    }
}
