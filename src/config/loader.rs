use super::types::Config;
use crate::billing::catalog::{catalog_path, CatalogFile};
use crate::billing::RateCard;
use std::fs;
use std::path::PathBuf;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Write the built-in rate catalog to rates.toml if no catalog exists yet
    pub fn init_rate_file() -> Result<(), Box<dyn std::error::Error>> {
        let path = catalog_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            let file = CatalogFile {
                cards: RateCard::builtin_catalog(),
            };
            let content = toml::to_string_pretty(&file)?;
            fs::write(&path, content)?;
            println!("Created rate catalog at {}", path.display());
        } else {
            println!("Rate catalog already exists at {}", path.display());
        }

        Ok(())
    }

    /// Ensure a rate catalog exists without printing output
    pub fn ensure_rate_file_exists() {
        let path = catalog_path();
        if path.exists() {
            return;
        }
        let _ = path.parent().map(fs::create_dir_all);
        if let Ok(content) = toml::to_string_pretty(&CatalogFile {
            cards: RateCard::builtin_catalog(),
        }) {
            let _ = fs::write(&path, content);
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        // Make sure the catalog is in place before any billing runs
        ConfigLoader::ensure_rate_file_exists();

        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.config/fleetrate/config.toml)
    fn get_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".config").join("fleetrate").join("config.toml")
        } else {
            PathBuf::from(".config/fleetrate/config.toml")
        }
    }

    /// Initialize config directory, default config and rate catalog
    pub fn init() -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        ConfigLoader::init_rate_file()?;

        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save()?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.sections.rental && !self.sections.haul && !self.sections.usage {
            return Err("No statement sections enabled".into());
        }

        self.haul.validate()?;

        // Every card in the active catalog must be priceable
        let catalog = RateCard::get_catalog_with_fallback();
        if catalog.is_empty() {
            return Err("Rate catalog is empty".into());
        }
        for card in catalog.values() {
            card.validate()?;
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}
