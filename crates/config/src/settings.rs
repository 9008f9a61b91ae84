// Application settings
// Loaded from ~/.config/netrecon/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use netrecon_core::RouterDirectory;

/// Billing query service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingSettings {
    /// Paged query endpoint URL
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Batch size for paged retrieval
    pub page_size: usize,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
            page_size: 1000,
        }
    }
}

/// Speed-audit service connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// API base URL (token issuer and snapshot endpoint share it)
    pub base_url: String,
    pub email: String,
    pub password: String,
}

/// One router directory override entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterEntry {
    pub name: String,
    pub ip: String,
}

/// Top-level settings. Every section defaults so a partial file loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub billing: BillingSettings,
    pub audit: AuditSettings,
    /// Default snapshot date (YYYY.MM.DD) when the CLI gets no --date
    pub date: Option<String>,
    /// Router directory override; empty means the builtin table
    pub routers: Vec<RouterEntry>,
}

impl Settings {
    /// The router directory for this run: override entries when present,
    /// otherwise the builtin table.
    pub fn directory(&self) -> RouterDirectory {
        if self.routers.is_empty() {
            RouterDirectory::builtin()
        } else {
            RouterDirectory::from_pairs(
                self.routers
                    .iter()
                    .map(|e| (e.name.clone(), e.ip.clone())),
            )
        }
    }
}

/// Returns the path to the settings file.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("netrecon/settings.json"))
}

/// Load settings from the default location. Missing or unreadable files
/// yield defaults; a present-but-malformed file is an error.
pub fn load() -> Result<Settings, String> {
    match settings_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(Settings::default()),
    }
}

/// Load settings from an explicit file.
pub fn load_from(path: &Path) -> Result<Settings, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings file {}: {}", path.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse settings file {}: {}", path.display(), e))
}

/// Save settings to an explicit file, creating parent directories if needed.
pub fn save_to(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    fs::write(path, &contents).map_err(|e| format!("Failed to write settings file: {}", e))
}
