use serde::{Deserialize, Serialize};

/// Regulation category inferred from the kind token at the start of a
/// matched span. `Unknown` is a real value threaded through to callers,
/// never silently coerced to one of the known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Statute,
    Decree,
    GovernmentRegulation,
    Notice,
    Unknown,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statute => "statute",
            Self::Decree => "decree",
            Self::GovernmentRegulation => "government_regulation",
            Self::Notice => "notice",
            Self::Unknown => "unknown",
        }
    }

    /// Abbreviated prefix used in canonical keys. `None` for `Unknown`,
    /// which has no canonical spelling.
    pub fn canonical_prefix(self) -> Option<&'static str> {
        match self {
            Self::Statute => Some("z."),
            Self::Decree => Some("v."),
            Self::GovernmentRegulation => Some("n.v."),
            Self::Notice => Some("s."),
            Self::Unknown => None,
        }
    }
}

/// Numeric citation body as it appears in the source text: gazette
/// sequence number and publication year, digits preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationNumber {
    pub sequence: String,
    pub year: String,
}

/// One detected citation occurrence. `start..end` is a half-open byte
/// range into the original input text, so `&text[start..end]` always
/// equals `raw_text`. The canonical key is absent when the kind is
/// unknown or the year fails normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationMatch {
    pub raw_text: String,
    pub start: usize,
    pub end: usize,
    pub kind: Kind,
    pub number: CitationNumber,
    pub canonical_key: Option<String>,
}

/// Query parameters for the external legal-database API: a collection
/// namespace and a `<year>-<sequence>` document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupKey {
    pub collection: String,
    pub document: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub filename: String,
    pub sha256: String,
    pub bytes: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFileReport {
    pub filename: String,
    pub sha256: String,
    pub match_count: usize,
    pub resolved_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReportManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub mode: String,
    pub year_pivot: u8,
    pub total_matches: usize,
    pub files: Vec<ScanFileReport>,
    pub warnings: Vec<String>,
}
