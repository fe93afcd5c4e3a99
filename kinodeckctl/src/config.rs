//! Console configuration, stored next to the session file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_url: "http://localhost:3000".to_string() }
    }
}

impl Config {
    /// Resolution order: config file, then `KINODECK_API_URL`, then the
    /// `--api-url` flag via [`Config::with_override`].
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        if let Ok(url) = std::env::var("KINODECK_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        config
    }

    fn from_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("kinodeck").join("config.json");
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn with_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("kinodeck");
            std::fs::create_dir_all(&app_dir)?;
            let config_path = app_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }
}
