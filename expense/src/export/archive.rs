use crate::domain::repository::ReceiptStorage;
use anyhow::Context;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const RECEIPTS_FOLDER: &str = "receipts";

/// Zips the spreadsheet with every readable receipt. Receipts that cannot be
/// read are left out with a warning.
pub async fn package(
    spreadsheet_name: &str,
    spreadsheet: &[u8],
    receipts: &[String],
    storage: &dyn ReceiptStorage,
) -> anyhow::Result<Vec<u8>> {
    let mut entries = Vec::with_capacity(receipts.len());
    let mut names: HashSet<String> = HashSet::new();

    for path in receipts {
        let Some(name) = Path::new(path).file_name().and_then(|n| n.to_str()) else {
            log::warn!(path:? = path; "Skipping receipt without a file name");
            continue;
        };
        if names.contains(name) {
            log::warn!(path:? = path; "Skipping receipt with a duplicate file name");
            continue;
        }

        match storage.read(path).await {
            Ok(data) => {
                names.insert(name.to_string());
                entries.push((format!("{RECEIPTS_FOLDER}/{name}"), data));
            }
            Err(err) => log::warn!(path:? = path, err:? = err; "Error reading receipt"),
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file(spreadsheet_name, options)
        .context("start spreadsheet entry")?;
    zip.write_all(spreadsheet).context("write spreadsheet entry")?;

    for (name, data) in entries {
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("start entry {name}"))?;
        zip.write_all(&data)
            .with_context(|| format!("write entry {name}"))?;
    }

    Ok(zip.finish().context("finish archive")?.into_inner())
}
