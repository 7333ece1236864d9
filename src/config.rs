use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "faqdesk";
const DATABASE_PATH_ENV: &str = "FAQDESK_DATABASE_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub database: DatabaseConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub mode: StoreMode,
    pub log_level: String,
    pub color: bool,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub export_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub json_file: PathBuf,
}

/// Which store the commands run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Database,
    Memory,
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreMode::Database => write!(f, "database"),
            StoreMode::Memory => write!(f, "memory"),
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = data_dir();

        Self {
            general: GeneralConfig {
                mode: StoreMode::Database,
                log_level: "warn".to_string(),
                color: true,
                format: None,
            },
            database: DatabaseConfig {
                path: data_dir.join("faq.db"),
                export_file: data_dir.join("banco").join("faq_export.json"),
            },
            memory: MemoryConfig {
                json_file: data_dir.join("memoria").join("faq_export.json"),
            },
        }
    }
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl Config {
    /// Load a config file, writing the defaults there first if it is missing
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)
                .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?
        } else {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            default_config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_PATH_ENV)
            && !path.trim().is_empty()
        {
            self.database.path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.log_level.trim().is_empty() {
            return Err(AppError::System("Log level cannot be empty".to_string()));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(AppError::System("Database path cannot be empty".to_string()));
        }

        for (name, path) in [
            ("database.export_file", &self.database.export_file),
            ("memory.json_file", &self.memory.json_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AppError::System(format!("{} cannot be empty", name)));
            }
            if !is_json_file(path) {
                return Err(AppError::System(format!(
                    "{} should have a .json extension",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.mode, StoreMode::Database);
        assert!(config.database.path.ends_with("faqdesk/faq.db"));
        assert!(config.database.export_file.ends_with("banco/faq_export.json"));
        assert!(config.memory.json_file.ends_with("memoria/faq_export.json"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_custom(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn test_load_reads_mode_and_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[general]
mode = "memory"
log_level = "info"
color = false

[database]
path = "/tmp/faq.db"
export_file = "/tmp/banco.json"

[memory]
json_file = "/tmp/memoria.json"
"#,
        )
        .unwrap();

        let config = Config::load_custom(&path).unwrap();
        assert_eq!(config.general.mode, StoreMode::Memory);
        assert!(!config.general.color);
        assert_eq!(config.memory.json_file, PathBuf::from("/tmp/memoria.json"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_level = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.memory.json_file = PathBuf::from("faq.txt");
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut content = toml::to_string_pretty(&Config::default()).unwrap();
        content = content.replace("mode = \"database\"", "mode = \"oracle\"");
        std::fs::write(&path, content).unwrap();

        assert!(matches!(Config::load_custom(&path), Err(AppError::System(_))));
    }
}
