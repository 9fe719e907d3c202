use crate::billing::BillingContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Billing-context override for a specific equipment unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextOverride {
    pub context: BillingContext,
    /// Override source ("manual", import job id, etc.)
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl ContextOverride {
    pub fn new(context: BillingContext, source: String, notes: Option<String>) -> Self {
        Self {
            context,
            source,
            created_at: Utc::now(),
            notes,
        }
    }
}

/// Error types for context override operations
#[derive(Debug, Error)]
pub enum ContextOverrideError {
    #[error("Invalid override format. Expected: EQUIPMENT=CONTEXT")]
    InvalidFormat,
    #[error("{0}")]
    InvalidContext(String),
    #[error("Failed to access configuration file: {0}")]
    FileAccess(#[from] std::io::Error),
    #[error("Configuration file is corrupted: {0}")]
    CorruptedConfig(String),
}

impl From<serde_json::Error> for ContextOverrideError {
    fn from(error: serde_json::Error) -> Self {
        ContextOverrideError::CorruptedConfig(format!("JSON error: {}", error))
    }
}

/// Handles persistence and CRUD for per-equipment context overrides
pub struct ContextOverrideManager {
    config_path: PathBuf,
    overrides: HashMap<String, ContextOverride>,
}

impl ContextOverrideManager {
    /// Create a manager with the default config path
    pub fn new() -> Result<Self, ContextOverrideError> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| {
                ContextOverrideError::FileAccess(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not find home directory",
                ))
            })?
            .join(".config")
            .join("fleetrate");

        let config_path = config_dir.join("context_overrides.json");

        Ok(Self {
            config_path,
            overrides: HashMap::new(),
        })
    }

    /// Create a manager with a custom config path (for testing)
    pub fn with_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            overrides: HashMap::new(),
        }
    }

    fn ensure_config_dir(&self) -> Result<(), ContextOverrideError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Load overrides from file
    pub fn load(&mut self) -> Result<(), ContextOverrideError> {
        if !self.config_path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.config_path)?;
        if content.trim().is_empty() {
            return Ok(());
        }

        self.overrides = serde_json::from_str(&content).map_err(|e| {
            ContextOverrideError::CorruptedConfig(format!("JSON parsing failed: {}", e))
        })?;

        Ok(())
    }

    /// Save overrides to file
    pub fn save(&self) -> Result<(), ContextOverrideError> {
        self.ensure_config_dir()?;

        let content = serde_json::to_string_pretty(&self.overrides)?;
        fs::write(&self.config_path, content)?;

        Ok(())
    }

    /// Set an override for an equipment unit
    pub fn set_override(
        &mut self,
        equipment_id: &str,
        context: BillingContext,
        source: String,
        notes: Option<String>,
    ) -> Result<(), ContextOverrideError> {
        self.overrides.insert(
            equipment_id.to_string(),
            ContextOverride::new(context, source, notes),
        );
        self.save()
    }

    /// Get the override for an equipment unit
    pub fn get_override(&self, equipment_id: &str) -> Option<&ContextOverride> {
        self.overrides.get(equipment_id)
    }

    /// Clear the override for an equipment unit
    pub fn clear_override(&mut self, equipment_id: &str) -> Result<bool, ContextOverrideError> {
        let removed = self.overrides.remove(equipment_id).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Parse an `EQUIPMENT=CONTEXT` override spec
    pub fn parse_override_spec(
        input: &str,
    ) -> Result<(String, BillingContext), ContextOverrideError> {
        let (equipment, context_str) = input
            .split_once('=')
            .ok_or(ContextOverrideError::InvalidFormat)?;

        let equipment = equipment.trim();
        if equipment.is_empty() {
            return Err(ContextOverrideError::InvalidFormat);
        }

        let context = context_str
            .trim()
            .parse::<BillingContext>()
            .map_err(ContextOverrideError::InvalidContext)?;

        Ok((equipment.to_string(), context))
    }

    /// Number of stored overrides
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// All equipment units with an override (for display)
    pub fn get_all_equipment(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.overrides.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Config file path (for display)
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_manager(name: &str) -> ContextOverrideManager {
        let path = std::env::temp_dir().join(format!("fleetrate-test-{}.json", name));
        let _ = fs::remove_file(&path);
        ContextOverrideManager::with_path(path)
    }

    #[test]
    fn test_set_get_clear_override() {
        let mut manager = temp_manager("set-get-clear");

        manager
            .set_override("EXC-201", BillingContext::Owner, "manual".to_string(), None)
            .unwrap();
        assert_eq!(
            manager.get_override("EXC-201").unwrap().context,
            BillingContext::Owner
        );

        assert!(manager.clear_override("EXC-201").unwrap());
        assert!(manager.get_override("EXC-201").is_none());
        assert!(!manager.clear_override("EXC-201").unwrap());

        let _ = fs::remove_file(manager.config_path());
    }

    #[test]
    fn test_overrides_survive_reload() {
        let mut manager = temp_manager("reload");
        manager
            .set_override(
                "DOZ-114",
                BillingContext::External,
                "manual".to_string(),
                Some("cross-unit job".to_string()),
            )
            .unwrap();

        let mut reloaded = ContextOverrideManager::with_path(manager.config_path().clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.override_count(), 1);
        assert_eq!(
            reloaded.get_override("DOZ-114").unwrap().context,
            BillingContext::External
        );

        let _ = fs::remove_file(manager.config_path());
    }

    #[test]
    fn test_parse_override_spec() {
        let (id, context) =
            ContextOverrideManager::parse_override_spec("EXC-201=external").unwrap();
        assert_eq!(id, "EXC-201");
        assert_eq!(context, BillingContext::External);

        assert!(ContextOverrideManager::parse_override_spec("EXC-201").is_err());
        assert!(ContextOverrideManager::parse_override_spec("=owner").is_err());
        assert!(ContextOverrideManager::parse_override_spec("EXC-201=vip").is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let mut manager = temp_manager("missing");
        manager.load().unwrap();
        assert_eq!(manager.override_count(), 0);
    }
}
