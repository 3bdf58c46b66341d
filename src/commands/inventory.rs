use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::model::{DocumentEntry, DocumentInventoryManifest};
use crate::util::{now_utc_string, sha256_hex, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.docs_root)?;

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.docs_root
            .join("manifests")
            .join("document_inventory.json")
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(docs_root: &Path) -> Result<DocumentInventoryManifest> {
    let mut document_paths = discover_documents(docs_root)?;
    document_paths.sort();

    if document_paths.is_empty() {
        bail!("no text documents found in {}", docs_root.display());
    }

    let mut documents = Vec::with_capacity(document_paths.len());
    for path in document_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read document: {}", path.display()))?;

        documents.push(DocumentEntry {
            filename,
            sha256: sha256_hex(content.as_bytes()),
            bytes: content.len(),
            lines: content.lines().count(),
        });
    }

    Ok(DocumentInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: docs_root.display().to_string(),
        document_count: documents.len(),
        documents,
    })
}

fn discover_documents(docs_root: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    let entries = fs::read_dir(docs_root)
        .with_context(|| format!("failed to read {}", docs_root.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", docs_root.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);

        if is_text {
            documents.push(path);
        }
    }

    Ok(documents)
}
