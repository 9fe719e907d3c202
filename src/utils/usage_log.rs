use crate::billing::UsageEntry;
use crate::config::LogRecord;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Extract the equipment id from a log file path (the file stem)
pub fn extract_equipment_id(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Parse a JSONL line and extract a usage entry if it is a valid meter record
pub fn parse_line_to_entry(
    line: &str,
    file_equipment_id: &str,
    seen: &mut HashSet<String>,
) -> Option<UsageEntry> {
    let record: LogRecord = serde_json::from_str(line).ok()?;

    // Only meter records carry billable engine hours
    if record.r#type.as_deref() != Some("meter") {
        return None;
    }

    let hours = record.engine_hours?;
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }

    // Exports overlap; drop readings we have already seen
    if let Some(reading_id) = record.reading_id.as_ref() {
        if seen.contains(reading_id) {
            return None;
        }
        seen.insert(reading_id.clone());
    }
    // Records without a reading id are kept as-is

    // The record's own equipment id wins over the file name
    let equipment_id = record
        .equipment_id
        .as_deref()
        .unwrap_or(file_equipment_id)
        .to_string();

    let timestamp = if let Some(ts_str) = record.timestamp.as_deref() {
        DateTime::parse_from_rfc3339(ts_str)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    } else {
        Utc::now()
    };

    Some(UsageEntry {
        timestamp,
        equipment_id,
        hours,
    })
}
