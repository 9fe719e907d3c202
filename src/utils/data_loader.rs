use crate::billing::UsageEntry;
use crate::utils::usage_log::{extract_equipment_id, parse_line_to_entry};
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub struct DataLoader {
    log_dirs: Vec<PathBuf>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            log_dirs: Self::find_log_dirs(),
        }
    }

    /// Create a loader over explicit directories (for testing)
    pub fn with_dirs(log_dirs: Vec<PathBuf>) -> Self {
        Self { log_dirs }
    }

    /// Find all meter-log directories
    fn find_log_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Ok(home) = std::env::var("HOME") {
            let default_path = PathBuf::from(&home).join(".local/share/fleetrate/logs");
            if default_path.exists() {
                dirs.push(default_path);
            }
        }

        // Support extra directories via environment variable
        if let Ok(custom_dirs) = std::env::var("FLEETRATE_LOG_DIR") {
            for dir in custom_dirs.split(',') {
                let path = PathBuf::from(dir.trim());
                if path.exists() {
                    dirs.push(path);
                }
            }
        }

        dirs
    }

    /// Load all meter readings from all log directories
    pub fn load_all_logs(&self) -> Vec<UsageEntry> {
        let mut all_entries = Vec::new();
        let mut seen_readings = HashSet::new();

        for dir in &self.log_dirs {
            let pattern = format!("{}/**/*.jsonl", dir.display());
            if let Ok(paths) = glob(&pattern) {
                for path in paths.flatten() {
                    let equipment_id = extract_equipment_id(&path);
                    let entries = self.parse_jsonl_file(&path, &equipment_id, &mut seen_readings);
                    all_entries.extend(entries);
                }
            }
        }

        all_entries.sort_by_key(|e| e.timestamp);

        all_entries
    }

    /// Parse a single JSONL meter export
    fn parse_jsonl_file(
        &self,
        path: &Path,
        equipment_id: &str,
        seen: &mut HashSet<String>,
    ) -> Vec<UsageEntry> {
        let mut entries = Vec::new();

        let file = match fs::File::open(path) {
            Ok(f) => f,
            Err(_) => return entries,
        };

        let reader = BufReader::new(file);
        for line in reader.lines().map_while(Result::ok) {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(entry) = parse_line_to_entry(&line, equipment_id, seen) {
                entries.push(entry);
            }
        }

        entries
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}
