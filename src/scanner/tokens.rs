use regex::Regex;

use crate::model::Kind;

/// Kind-token alternatives in classification priority order: government
/// regulation before decree before statute, because the single-letter
/// abbreviations overlap ("n." / "v." / "z."). Each entry is a regex
/// alternative valid inside a case-insensitive group. OCR misreads
/// (v/y swaps, dropped diacritics) sit alongside the canonical
/// spellings; new variants are appended here, never inlined elsewhere.
pub(crate) const KIND_TOKENS: &[(Kind, &[&str])] = &[
    (
        Kind::GovernmentRegulation,
        &[
            r"nař\.?[,\s]*vl[aá]dy",
            r"nař\.?[,\s]*vl\.?",
            r"(?:nařízení|narizeni)[,\s]*[vy](?:lády|lady)",
            r"nařízení",
            r"narizeni",
            r"n\.?[,\s]*[vy](?:lády|lady)",
            r"n\.?[,\s]*[vy]\.?",
            r"n\.v\.",
            r"nv",
        ],
    ),
    (
        Kind::Decree,
        &[r"[vy][ya]hl[aá][sš]ka", r"[vy]yhl[.,]?", r"[vy]\.?"],
    ),
    (Kind::Statute, &[r"z[aá]kon", r"z[aá]k\.?", r"z\.?"]),
    (
        Kind::Notice,
        &[r"sd[eě]len[ií](?:\s+(?-i:\p{Lu}{2,}))?"],
    ),
];

/// Bare citation number: gazette sequence over a 2- or 4-digit year.
pub(super) const LAW_NUMBER: &str = r"\d{1,4}/\d{2,4}";

/// Informal regulation name tolerated between the kind token and the
/// number marker: either a word chain joined by "a"/"č" or a short run
/// of letters and spaces. Skipped over, never part of the identity.
const TITLE_FRAGMENT: &str = r"\p{L}\w*(?:\s*(?:a|č)\s*\p{L}\w*)*|[\p{L}\s]{1,30}";

const NUMBER_MARKER: &str = r"(?:číslo|cislo|čislo|císlo|,,\s*č\.?|č\s*\.?|c\.?)";

/// Full citation grammar: kind token, optional title fragment, number
/// marker, citation number, gazette marker. Word boundaries on both
/// sides are validated by the scanner, not the pattern, because the
/// regex engine has no lookaround.
pub(super) fn citation_pattern() -> Result<Regex, regex::Error> {
    let pattern = format!(
        r"(?i)(?:{kinds})\s*(?:{TITLE_FRAGMENT})?\s*,?\s*{NUMBER_MARKER}\s*(?P<number>{LAW_NUMBER})\s*sb\.?",
        kinds = kind_token_union(),
    );
    Regex::new(&pattern)
}

pub(super) fn law_number_pattern() -> Result<Regex, regex::Error> {
    Regex::new(LAW_NUMBER)
}

fn kind_token_union() -> String {
    KIND_TOKENS
        .iter()
        .flat_map(|(_, alternatives)| alternatives.iter().copied())
        .collect::<Vec<&str>>()
        .join("|")
}
