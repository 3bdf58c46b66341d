use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::warn;

use crate::cli::ResolveArgs;
use crate::lookup::CanonicalKeyParser;
use crate::model::LookupKey;
use crate::normalize::normalize_year;
use crate::scanner::CitationScanner;

pub fn run(args: ResolveArgs) -> Result<()> {
    let scanner = CitationScanner::with_year_pivot(args.year_pivot)?;
    let matches = scanner.scan(&args.citation);

    let Some(found) = matches.first() else {
        bail!("no citation recognized in: {}", args.citation);
    };

    let source_number = format!("{}/{}", found.number.sequence, found.number.year);
    let normalized_number = normalize_year(&source_number, args.year_pivot).ok();

    let lookup = match found.canonical_key.as_deref() {
        Some(canonical_key) => match CanonicalKeyParser::new()?.to_lookup_key(canonical_key) {
            Ok(lookup) => Some(lookup),
            Err(error) => {
                warn!(%error, "citation has no external lookup key");
                None
            }
        },
        None => None,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());

    if args.json {
        let response = ResolveResponse {
            citation: &found.raw_text,
            kind: found.kind.as_str(),
            number: &source_number,
            normalized_number: normalized_number.as_deref(),
            canonical_key: found.canonical_key.as_deref(),
            lookup,
        };
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize resolve output")?;
        writeln!(output)?;
    } else {
        writeln!(output, "Citation: {}", found.raw_text)?;
        writeln!(output, "Kind: {}", found.kind.as_str())?;
        writeln!(output, "Number: {source_number}")?;
        if let Some(normalized_number) = &normalized_number {
            writeln!(output, "Normalized: {normalized_number}")?;
        }
        if let Some(canonical_key) = &found.canonical_key {
            writeln!(output, "Canonical: {canonical_key}")?;
        }
        if let Some(lookup) = &lookup {
            writeln!(
                output,
                "Lookup: collection={} document={}",
                lookup.collection, lookup.document
            )?;
        }
    }

    output.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ResolveResponse<'a> {
    citation: &'a str,
    kind: &'a str,
    number: &'a str,
    normalized_number: Option<&'a str>,
    canonical_key: Option<&'a str>,
    lookup: Option<LookupKey>,
}
