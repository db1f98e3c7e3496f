use std::io::{self, Write};

use shelfscan_ocr::ScanReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Three human-readable lines.
    #[default]
    Text,
    /// One JSON object.
    Json,
}

pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Extracted Barcode Data: {}", report.code)?;
            writeln!(out, "Item Type: {}", report.category)?;
            writeln!(out, "Storage Position: {}", report.location)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscan_core::{Code, ItemCategory, StorageLocation};

    fn report(code: &str, category: ItemCategory) -> ScanReport {
        ScanReport {
            code: Code::normalize(code).unwrap(),
            category,
            location: StorageLocation::for_category(category),
        }
    }

    #[test]
    fn text_format() {
        let mut out = Vec::new();
        write_report(&mut out, &report("0987654321", ItemCategory::Perishable), OutputFormat::Text)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Extracted Barcode Data: 0987654321\nItem Type: Perishable Item\nStorage Position: Near Exit\n"
        );
    }

    #[test]
    fn text_format_unknown_item() {
        let mut out = Vec::new();
        write_report(&mut out, &report("9999999999", ItemCategory::Unknown), OutputFormat::Text)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Item Type: Unknown Item\n"));
        assert!(text.ends_with("Storage Position: General Section\n"));
    }

    #[test]
    fn json_format() {
        let mut out = Vec::new();
        write_report(&mut out, &report("1122334455", ItemCategory::Heavy), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "1122334455",
                "item_type": "Heavy Item",
                "storage_position": "Lower Section",
            })
        );
    }
}
