//! CSV export of translated items.

use crate::error::{Error, Result};
use crate::presenter::TranslatedItem;
use std::path::Path;

/// Column headers, in export order
pub const CSV_HEADERS: [&str; 6] = ["원문 제목", "번역 제목", "날짜", "원문 내용", "번역 내용", "링크"];

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// MIME type of the export
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Serialize `items` as UTF-8 CSV with a BOM and a header row.
///
/// Every row has exactly the six columns of [`CSV_HEADERS`].
pub fn to_csv_bytes(items: &[TranslatedItem]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(CSV_HEADERS)?;
    for item in items {
        writer.write_record([
            item.original_title.as_str(),
            item.translated_title.as_str(),
            item.date.as_str(),
            item.original_summary.as_str(),
            item.translated_summary.as_str(),
            item.link.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Other(format!("Failed to finish CSV export: {}", e)))
}

/// Write the CSV export of `items` to `path`
pub fn write_csv_file(items: &[TranslatedItem], path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(items)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), rows = items.len(), "CSV export written");
    Ok(())
}
