use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{ScanArgs, ScanMode};
use crate::lookup::CanonicalKeyParser;
use crate::model::{CitationMatch, LookupKey, ScanFileReport, ScanReportManifest};
use crate::scanner::{CitationScanner, LawNumberScanner};
use crate::util::{now_utc_string, sha256_hex, utc_compact_string, write_json_pretty};

pub fn run(args: ScanArgs) -> Result<()> {
    let scanner = ModeScanner::for_mode(args.mode, args.year_pivot)?;
    let parser = CanonicalKeyParser::new()?;

    let mut inputs = Vec::new();
    if args.inputs.is_empty() {
        inputs.push(("<stdin>".to_string(), read_stdin()?));
    } else {
        for path in &args.inputs {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read input: {}", path.display()))?;
            inputs.push((path.display().to_string(), content));
        }
    }

    let mut file_outputs = Vec::new();
    let mut file_reports = Vec::new();
    let mut warnings = Vec::new();

    for (filename, content) in &inputs {
        let matches = scanner.scan(content);
        let records = matches
            .iter()
            .map(|found| MatchRecord::build(found, &parser, &mut warnings))
            .collect::<Vec<MatchRecord>>();

        file_reports.push(ScanFileReport {
            filename: filename.clone(),
            sha256: sha256_hex(content.as_bytes()),
            match_count: records.len(),
            resolved_count: records
                .iter()
                .filter(|record| record.lookup.is_some())
                .count(),
        });
        file_outputs.push(FileOutput {
            filename: filename.clone(),
            matches: records,
        });
    }

    if args.json {
        write_json_output(&args, &file_outputs)?;
    } else {
        write_text_output(&file_outputs)?;
    }

    let total_matches = file_reports.iter().map(|report| report.match_count).sum();

    if let Some(report_dir) = &args.report_dir {
        let manifest = ScanReportManifest {
            manifest_version: 1,
            generated_at: now_utc_string(),
            mode: args.mode.as_str().to_string(),
            year_pivot: args.year_pivot,
            total_matches,
            files: file_reports,
            warnings,
        };
        let report_path =
            report_dir.join(format!("scan_report_{}.json", utc_compact_string(Utc::now())));
        write_json_pretty(&report_path, &manifest)?;
        info!(path = %report_path.display(), "wrote scan report");
    }

    info!(total_matches, mode = args.mode.as_str(), "scan completed");
    Ok(())
}

enum ModeScanner {
    Full(CitationScanner),
    NumberOnly(LawNumberScanner),
}

impl ModeScanner {
    fn for_mode(mode: ScanMode, year_pivot: u8) -> Result<Self> {
        match mode {
            ScanMode::Full => Ok(Self::Full(CitationScanner::with_year_pivot(year_pivot)?)),
            ScanMode::NumberOnly => Ok(Self::NumberOnly(LawNumberScanner::new()?)),
        }
    }

    fn scan(&self, text: &str) -> Vec<CitationMatch> {
        match self {
            Self::Full(scanner) => scanner.scan(text),
            Self::NumberOnly(scanner) => scanner.scan(text),
        }
    }
}

#[derive(Serialize)]
struct FileOutput {
    filename: String,
    matches: Vec<MatchRecord>,
}

#[derive(Serialize)]
struct MatchRecord {
    raw_text: String,
    start: usize,
    end: usize,
    kind: &'static str,
    sequence: String,
    year: String,
    canonical_key: Option<String>,
    lookup: Option<LookupKey>,
}

impl MatchRecord {
    fn build(
        found: &CitationMatch,
        parser: &CanonicalKeyParser,
        warnings: &mut Vec<String>,
    ) -> Self {
        let lookup = found
            .canonical_key
            .as_deref()
            .and_then(|key| match parser.to_lookup_key(key) {
                Ok(lookup) => Some(lookup),
                Err(error) => {
                    warn!(%error, "citation has no external lookup key");
                    warnings.push(error.to_string());
                    None
                }
            });

        Self {
            raw_text: found.raw_text.clone(),
            start: found.start,
            end: found.end,
            kind: found.kind.as_str(),
            sequence: found.number.sequence.clone(),
            year: found.number.year.clone(),
            canonical_key: found.canonical_key.clone(),
            lookup,
        }
    }
}

#[derive(Serialize)]
struct ScanResponse<'a> {
    mode: &'a str,
    year_pivot: u8,
    files: &'a [FileOutput],
}

fn write_json_output(args: &ScanArgs, file_outputs: &[FileOutput]) -> Result<()> {
    let response = ScanResponse {
        mode: args.mode.as_str(),
        year_pivot: args.year_pivot,
        files: file_outputs,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize scan output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_output(file_outputs: &[FileOutput]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    for file in file_outputs {
        writeln!(output, "File: {}", file.filename)?;
        writeln!(output, "Matches: {}", file.matches.len())?;

        for (index, found) in file.matches.iter().enumerate() {
            writeln!(
                output,
                "{}.\t[{}..{})\t{}\t{}",
                index + 1,
                found.start,
                found.end,
                found.kind,
                found.raw_text
            )?;
            if let Some(canonical_key) = &found.canonical_key {
                writeln!(output, "\tcanonical: {canonical_key}")?;
            }
            if let Some(lookup) = &found.lookup {
                writeln!(
                    output,
                    "\tlookup: collection={} document={}",
                    lookup.collection, lookup.document
                )?;
            }
        }
    }

    output.flush()?;
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("failed to read stdin")?;
    Ok(content)
}
