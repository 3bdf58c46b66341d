use super::lines::line_spans;
use super::{CitationScanner, LawNumberScanner};
use crate::lookup::CanonicalKeyParser;
use crate::model::Kind;
use crate::normalize::DEFAULT_YEAR_PIVOT;

fn scanner() -> CitationScanner {
    CitationScanner::with_year_pivot(DEFAULT_YEAR_PIVOT).expect("scanner compiles")
}

#[test]
fn line_spans_track_original_offsets_across_mixed_terminators() {
    let text = "a\r\nbb\rc\nd";
    let collected = line_spans(text).collect::<Vec<(&str, usize)>>();
    assert_eq!(collected, vec![("a", 0), ("bb", 3), ("c", 6), ("d", 8)]);
}

#[test]
fn line_spans_skip_trailing_empty_line() {
    let collected = line_spans("jeden\n").collect::<Vec<(&str, usize)>>();
    assert_eq!(collected, vec![("jeden", 0)]);
}

#[test]
fn empty_input_yields_no_matches() {
    assert!(scanner().scan("").is_empty());
}

#[test]
fn finds_statute_citation_with_offsets_into_original_text() {
    let text = "Podle zákona č. 89/2012 Sb. platí nové podmínky.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(&text[found.start..found.end], found.raw_text);
    assert_eq!(found.raw_text, "zákona č. 89/2012 Sb.");
    assert_eq!(found.kind, Kind::Statute);
    assert_eq!(found.number.sequence, "89");
    assert_eq!(found.number.year, "2012");
    assert_eq!(found.canonical_key.as_deref(), Some("z. c. 89/2012 sb."));
}

#[test]
fn scanning_is_idempotent() {
    let text = "Zákon č. 1/2020 Sb.\nVyhláška č. 2/2021 Sb.";
    let scanner = scanner();
    assert_eq!(scanner.scan(text), scanner.scan(text));
}

#[test]
fn second_line_offsets_account_for_crlf_terminator() {
    let text = "Zákon č. 1/2020 Sb.\r\nVyhláška č. 2/2021 Sb.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 2);
    let second = &matches[1];
    assert_eq!(second.start, text.find("Vyhláška").expect("second line present"));
    assert_eq!(&text[second.start..second.end], second.raw_text);
    assert_eq!(second.kind, Kind::Decree);
}

#[test]
fn spelling_variants_share_one_canonical_key() {
    let scanner = scanner();
    let variants = [
        "zákon č. 89/2012 Sb.",
        "z. c. 89/2012 sb",
        "Zák. číslo 89/2012 SB",
    ];

    for text in variants {
        let matches = scanner.scan(text);
        assert_eq!(matches.len(), 1, "no match in {text:?}");
        assert_eq!(
            matches[0].canonical_key.as_deref(),
            Some("z. c. 89/2012 sb."),
            "wrong key for {text:?}"
        );
    }
}

#[test]
fn government_regulation_end_to_end() {
    let text = "Podle nařízení vlády číslo 589/2006 Sb. se stanoví sazby.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.kind, Kind::GovernmentRegulation);
    assert_eq!(found.canonical_key.as_deref(), Some("n.v. c. 589/2006 sb."));
}

#[test]
fn scanner_output_feeds_the_lookup_gate() {
    let matches = scanner().scan("Podle nařízení vlády číslo 589/2006 Sb. se stanoví sazby.");
    let key = matches[0].canonical_key.as_deref().expect("canonical key");

    let lookup = CanonicalKeyParser::new()
        .expect("parser compiles")
        .to_lookup_key(key)
        .expect("valid key");
    assert_eq!(lookup.collection, "cs");
    assert_eq!(lookup.document, "2006-589");
}

#[test]
fn abbreviated_government_regulation_tokens_classify_first() {
    let scanner = scanner();
    let variants = [
        "NV č. 361/2007 Sb.",
        "n. v. č. 361/2007 Sb.",
        "nař. vlády č. 361/2007 Sb.",
    ];

    for text in variants {
        let matches = scanner.scan(text);
        assert_eq!(matches.len(), 1, "no match in {text:?}");
        assert_eq!(matches[0].kind, Kind::GovernmentRegulation, "for {text:?}");
        assert_eq!(
            matches[0].canonical_key.as_deref(),
            Some("n.v. c. 361/2007 sb."),
            "wrong key for {text:?}"
        );
    }
}

#[test]
fn ocr_variants_of_decree_share_one_canonical_key() {
    let scanner = scanner();
    let variants = [
        "yyhláška č. 12/1998 Sb.",
        "vahlaska c. 12/1998 sb.",
        "vyhl, č. 12/1998 Sb.",
    ];

    for text in variants {
        let matches = scanner.scan(text);
        assert_eq!(matches.len(), 1, "no match in {text:?}");
        assert_eq!(matches[0].kind, Kind::Decree, "for {text:?}");
        assert_eq!(
            matches[0].canonical_key.as_deref(),
            Some("v. c. 12/1998 sb."),
            "wrong key for {text:?}"
        );
    }
}

#[test]
fn notice_with_issuing_body_is_scanned_and_classified() {
    let text = "Sdělení ČSÚ č. 278/2020 Sb. o aktualizaci klasifikace";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, Kind::Notice);
    assert_eq!(matches[0].canonical_key.as_deref(), Some("s. c. 278/2020 sb."));
}

#[test]
fn informal_title_between_kind_and_number_is_skipped() {
    let text = "zákon o obchodních korporacích č. 90/2012 Sb.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_text, text);
    assert_eq!(matches[0].canonical_key.as_deref(), Some("z. c. 90/2012 sb."));
}

#[test]
fn reports_multiple_matches_left_to_right() {
    let text = "Zákon č. 1/2000 Sb. a vyhláška č. 9/2005 Sb. se mění.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 2);
    assert!(matches[0].start < matches[1].start);
    assert_eq!(matches[0].kind, Kind::Statute);
    assert_eq!(matches[1].kind, Kind::Decree);
}

#[test]
fn amending_prefix_is_stripped_and_remainder_kept() {
    let text = "ve znění zákona č. 10/2000 Sb.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.raw_text, "zákona č. 10/2000 Sb.");
    assert_eq!(found.start, text.find("zákona").expect("kept remainder"));
    assert_eq!(&text[found.start..found.end], found.raw_text);
    assert_eq!(found.canonical_key.as_deref(), Some("z. c. 10/2000 sb."));
}

#[test]
fn bare_amending_word_prefix_is_stripped() {
    let text = "znění zákona č. 89/2012 Sb.";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_text, "zákona č. 89/2012 Sb.");
}

#[test]
fn amending_reference_before_abbreviation_is_discarded() {
    assert!(scanner().scan("ve znění vyhl. č. 4/2001 Sb.").is_empty());
}

#[test]
fn device_number_lookalike_is_dropped_after_stripping() {
    assert!(scanner().scan("zařízení č. 15/2020 Sb. je certifikováno").is_empty());
}

#[test]
fn collection_marker_glued_to_word_is_rejected() {
    assert!(scanner().scan("zákon č. 1/2000 Sbírka").is_empty());
}

#[test]
fn glued_prefix_before_kind_token_is_rejected() {
    assert!(scanner().scan("xzákon č. 1/2000 Sb.").is_empty());
}

#[test]
fn kind_token_after_closing_parenthesis_is_accepted() {
    let matches = scanner().scan(")zákon č. 1/2000 Sb.");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_text, "zákon č. 1/2000 Sb.");
}

#[test]
fn citation_split_across_lines_is_not_recognized() {
    assert!(scanner().scan("zákon č.\n89/2012 Sb.").is_empty());
}

#[test]
fn two_digit_years_expand_around_the_pivot() {
    let scanner = scanner();
    let cases = [
        ("zákon č. 1/71 Sb.", "z. c. 1/1971 sb."),
        ("zákon č. 1/70 Sb.", "z. c. 1/2070 sb."),
        ("zákon č. 1/99 Sb.", "z. c. 1/1999 sb."),
        ("zákon č. 1/05 Sb.", "z. c. 1/2005 sb."),
    ];

    for (text, expected) in cases {
        let matches = scanner.scan(text);
        assert_eq!(matches.len(), 1, "no match in {text:?}");
        assert_eq!(matches[0].canonical_key.as_deref(), Some(expected), "for {text:?}");
    }
}

#[test]
fn year_pivot_is_configurable() {
    let scanner = CitationScanner::with_year_pivot(50).expect("scanner compiles");
    let matches = scanner.scan("zákon č. 8/60 Sb.");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].canonical_key.as_deref(), Some("z. c. 8/1960 sb."));
}

#[test]
fn three_digit_year_keeps_match_but_no_canonical_key() {
    let matches = scanner().scan("zákon č. 1/123 Sb.");

    assert_eq!(matches.len(), 1);
    assert!(matches[0].canonical_key.is_none());
}

#[test]
fn garbled_control_characters_do_not_panic() {
    let text = "\u{0000}\u{FFFD} zákon\tč.\t7/2019\tSb.\u{0007}";
    let matches = scanner().scan(text);

    assert_eq!(matches.len(), 1);
    assert_eq!(&text[matches[0].start..matches[0].end], matches[0].raw_text);
    assert_eq!(matches[0].canonical_key.as_deref(), Some("z. c. 7/2019 sb."));
}

#[test]
fn law_number_scanner_reports_bare_numbers_with_offsets() {
    let text = "smlouva 123/2019 a dodatek\r\nč. 45/21";
    let scanner = LawNumberScanner::new().expect("scanner compiles");
    let matches = scanner.scan(text);

    assert_eq!(matches.len(), 2);
    assert_eq!(&text[matches[0].start..matches[0].end], "123/2019");
    assert_eq!(&text[matches[1].start..matches[1].end], "45/21");
    assert_eq!(matches[1].kind, Kind::Unknown);
    assert_eq!(matches[1].number.sequence, "45");
    assert_eq!(matches[1].number.year, "21");
    assert!(matches[1].canonical_key.is_none());
}

#[test]
fn law_number_scanner_ignores_text_without_numbers() {
    let scanner = LawNumberScanner::new().expect("scanner compiles");
    assert!(scanner.scan("žádné číslo tady není").is_empty());
}
