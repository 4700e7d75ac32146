//! History export

use crate::models::{HistoryRecord, PredictionHistory};

/// Download file name for exported history
pub const EXPORT_FILE_NAME: &str = "forest_cover_history.csv";

/// MIME type of exported history
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Export columns, in order
pub const CSV_COLUMNS: [&str; 6] = [
    "Elevation",
    "Slope",
    "Aspect",
    "Wilderness",
    "Soil Type",
    "Prediction",
];

/// Serializes session history for download
pub struct HistoryExporter;

impl HistoryExporter {
    /// Render history as CSV, most recent prediction first.
    ///
    /// An empty history produces the header line only.
    pub fn to_csv(history: &PredictionHistory) -> String {
        let mut csv_content = String::new();

        csv_content.push_str(&CSV_COLUMNS.join(","));
        csv_content.push('\n');

        for record in history.recent_first() {
            csv_content.push_str(&Self::row(record));
            csv_content.push('\n');
        }

        csv_content
    }

    fn row(record: &HistoryRecord) -> String {
        format!(
            "{},{},{},{},{},{}",
            record.elevation,
            record.slope,
            record.aspect,
            record.wilderness,
            record.soil_type,
            Self::escape_csv(record.prediction.label())
        )
    }

    /// Quote a field only when it contains a delimiter, quote or line break
    fn escape_csv(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}
