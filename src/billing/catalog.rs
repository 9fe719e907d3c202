use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use super::{RateCard, RateSet};

/// Rate card catalog cache
static CATALOG_CACHE: Lazy<RwLock<Option<HashMap<String, RateCard>>>> =
    Lazy::new(|| RwLock::new(None));

/// On-disk catalog format (`rates.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub cards: HashMap<String, RateCard>,
}

impl RateCard {
    /// Load the rate card catalog from the config directory (with caching)
    pub fn load_catalog() -> Result<HashMap<String, RateCard>, Box<dyn std::error::Error>> {
        // Check cache first
        if let Some(cached) = CATALOG_CACHE.read().unwrap().as_ref() {
            return Ok(cached.clone());
        }

        let path = catalog_path();
        let content = fs::read_to_string(&path)?;
        let file: CatalogFile = toml::from_str(&content)?;

        // Only keep cards that pass validation
        let mut catalog = HashMap::new();
        for (class, card) in file.cards {
            match card.validate() {
                Ok(()) => {
                    catalog.insert(class, card);
                }
                Err(e) => {
                    crate::debug_println!("Skipping rate card '{}': {}", class, e);
                }
            }
        }

        // Update cache
        *CATALOG_CACHE.write().unwrap() = Some(catalog.clone());

        Ok(catalog)
    }

    /// Get the catalog, falling back to the built-in cards when no file exists
    pub fn get_catalog_with_fallback() -> HashMap<String, RateCard> {
        match Self::load_catalog() {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => Self::builtin_catalog(),
            Err(e) => {
                crate::debug_println!("Failed to load rate catalog: {}", e);
                Self::builtin_catalog()
            }
        }
    }

    /// Built-in rate cards for common equipment classes
    pub fn builtin_catalog() -> HashMap<String, RateCard> {
        let mut m = HashMap::new();

        m.insert(
            "excavator-30t".to_string(),
            RateCard {
                equipment_class: "excavator-30t".to_string(),
                standard: RateSet {
                    hourly: 80.0,
                    daily: 850.0,
                    weekly: 3400.0,
                    monthly: 12000.0,
                },
                internal: Some(RateSet {
                    hourly: 60.0,
                    daily: 650.0,
                    weekly: 2600.0,
                    monthly: 9200.0,
                }),
                external: None,
                owner: None,
            },
        );

        m.insert(
            "dozer-d6".to_string(),
            RateCard {
                equipment_class: "dozer-d6".to_string(),
                standard: RateSet {
                    hourly: 95.0,
                    daily: 1050.0,
                    weekly: 4200.0,
                    monthly: 14500.0,
                },
                internal: Some(RateSet {
                    hourly: 72.0,
                    daily: 800.0,
                    weekly: 3200.0,
                    monthly: 11000.0,
                }),
                external: None,
                owner: Some(RateSet {
                    hourly: 110.0,
                    daily: 1200.0,
                    weekly: 4800.0,
                    monthly: 16500.0,
                }),
            },
        );

        m.insert(
            "crane-50t".to_string(),
            RateCard {
                equipment_class: "crane-50t".to_string(),
                standard: RateSet {
                    hourly: 185.0,
                    daily: 2100.0,
                    weekly: 8400.0,
                    monthly: 29000.0,
                },
                internal: None,
                external: Some(RateSet {
                    hourly: 210.0,
                    daily: 2400.0,
                    weekly: 9600.0,
                    monthly: 33000.0,
                }),
                owner: None,
            },
        );

        m.insert(
            "skid-steer".to_string(),
            RateCard {
                equipment_class: "skid-steer".to_string(),
                standard: RateSet {
                    hourly: 35.0,
                    daily: 325.0,
                    weekly: 1300.0,
                    monthly: 4200.0,
                },
                internal: None,
                external: None,
                owner: None,
            },
        );

        m.insert(
            "articulated-hauler".to_string(),
            RateCard {
                equipment_class: "articulated-hauler".to_string(),
                standard: RateSet {
                    hourly: 120.0,
                    daily: 1350.0,
                    weekly: 5400.0,
                    monthly: 18500.0,
                },
                internal: None,
                external: None,
                owner: None,
            },
        );

        m
    }

    /// Find the rate card for an equipment id or class, with fuzzy matching
    pub fn get_rate_card<'a>(
        catalog: &'a HashMap<String, RateCard>,
        equipment_id: &str,
    ) -> Option<&'a RateCard> {
        // Try exact match first
        if let Some(card) = catalog.get(equipment_id) {
            return Some(card);
        }

        // Try fuzzy matching against the class names
        let id_lower = equipment_id.to_lowercase();

        catalog
            .iter()
            .filter(|(key, _)| {
                let key_lower = key.to_lowercase();
                id_lower.contains(&key_lower) || key_lower.contains(&id_lower)
            })
            .max_by_key(|(key, _)| key.len()) // Prefer longer (more specific) matches
            .map(|(_, card)| card)
    }
}

/// Path of the catalog file (`~/.config/fleetrate/rates.toml`)
pub fn catalog_path() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join(".config").join("fleetrate").join("rates.toml")
    } else {
        PathBuf::from(".config/fleetrate/rates.toml")
    }
}
