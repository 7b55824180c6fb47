use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyseekConfig {
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    #[serde(default)]
    pub gemini: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_keyword_count")]
    pub default_keyword_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportConfig {
    /// Directory CSV exports are written to. Defaults to the current
    /// working directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_keyword_count() -> u8 {
    10
}

impl Default for KeyseekConfig {
    fn default() -> Self {
        Self {
            api_keys: ApiKeysConfig::default(),
            generation: GenerationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            default_keyword_count: default_keyword_count(),
        }
    }
}

impl KeyseekConfig {
    /// Load config from ~/.config/keyseek/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::KeyseekError::Config(format!("Failed to read config: {e}"))
            })?;
            let config: KeyseekConfig = toml::from_str(&contents).map_err(|e| {
                crate::error::KeyseekError::Config(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            let config = KeyseekConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::KeyseekError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::KeyseekError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("keyseek").join("config.toml"))
    }

    /// Resolve the Gemini credential: the GEMINI_API_KEY environment variable
    /// takes precedence over the config file. A missing credential is a fatal
    /// startup condition for the caller, not a per-call error.
    pub fn resolve_api_key(&self) -> crate::error::Result<String> {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
        if !self.api_keys.gemini.trim().is_empty() {
            return Ok(self.api_keys.gemini.clone());
        }
        Err(crate::error::KeyseekError::Config(format!(
            "No Gemini API key found. Set GEMINI_API_KEY or add it to {}",
            Self::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string())
        )))
    }

    /// Directory CSV exports land in.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
