use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{DocumentInventoryManifest, ScanReportManifest};

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.docs_root.join("manifests");
    let inventory_path = manifest_dir.join("document_inventory.json");

    info!(docs_root = %args.docs_root.display(), "status requested");

    if inventory_path.exists() {
        let raw = fs::read(&inventory_path)
            .with_context(|| format!("failed to read {}", inventory_path.display()))?;
        let inventory: DocumentInventoryManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", inventory_path.display()))?;

        info!(
            generated_at = %inventory.generated_at,
            document_count = inventory.document_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    match latest_scan_report(&manifest_dir)? {
        Some((path, report)) => {
            info!(
                path = %path.display(),
                generated_at = %report.generated_at,
                mode = %report.mode,
                year_pivot = report.year_pivot,
                total_matches = report.total_matches,
                files = report.files.len(),
                warnings = report.warnings.len(),
                "loaded scan report"
            );
        }
        None => warn!(path = %manifest_dir.display(), "no scan reports found"),
    }

    Ok(())
}

fn latest_scan_report(manifest_dir: &Path) -> Result<Option<(PathBuf, ScanReportManifest)>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let mut report_paths = Vec::new();
    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();

        let is_report = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("scan_report_") && name.ends_with(".json"))
            .unwrap_or(false);

        if is_report {
            report_paths.push(path);
        }
    }

    report_paths.sort();
    let Some(path) = report_paths.pop() else {
        return Ok(None);
    };

    let raw =
        fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let report = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(Some((path, report)))
}
