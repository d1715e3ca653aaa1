//! Plain-text report rendering for history entries.

use lumen_core::HistoryEntry;

/// Render one history entry as a downloadable plain-text report.
///
/// Pure and deterministic: the same entry always yields byte-identical
/// output. The section delimiters are part of the stable format.
pub fn format_report(entry: &HistoryEntry) -> String {
    format!(
        "AI IMAGE ANALYSIS REPORT\n\
         ========================\n\
         \n\
         Filename: {filename}\n\
         Analyzed: {timestamp}\n\
         \n\
         ANALYSIS RESULT:\n\
         ----------------\n\
         {analysis}\n",
        filename = entry.filename,
        timestamp = entry.timestamp,
        analysis = entry.analysis,
    )
}

/// Download filename for the report of the entry at 1-based `index`.
pub fn report_filename(index: usize) -> String {
    format!("analysis_report_{index}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry() -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            filename: "test.png".to_string(),
            analysis: "A red square.".to_string(),
            timestamp: "2026-08-07 12:00:00".to_string(),
            image_base64: "/9j/2Q==".to_string(),
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn format_is_pure_and_stable() {
        let e = entry();
        assert_eq!(format_report(&e), format_report(&e));
    }

    #[test]
    fn report_contains_fixed_sections() {
        let text = format_report(&entry());
        assert!(text.starts_with("AI IMAGE ANALYSIS REPORT\n"));
        assert!(text.contains("ANALYSIS RESULT:\n"));
        assert!(text.contains("Filename: test.png\n"));
        assert!(text.contains("Analyzed: 2026-08-07 12:00:00\n"));
        assert!(text.contains("A red square."));
    }

    #[test]
    fn report_filename_is_one_based() {
        assert_eq!(report_filename(1), "analysis_report_1.txt");
        assert_eq!(report_filename(12), "analysis_report_12.txt");
    }
}
