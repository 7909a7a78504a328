use crate::catalog::CatalogSpec;
use crate::decoration::{DEFAULT_GLYPH_COUNT, DEFAULT_SYMBOLS};
use crate::render::DEFAULT_PLACEHOLDER_URL;
use crate::share::{DEFAULT_SHARE_CAPTION, DEFAULT_SHARE_SERVICE};
use crate::utils::expand_tilde;
use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KEEPSAKE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub decoration: DecorationConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub count: u32,
    pub folder: PathBuf,
    pub base_name: String,
    pub extension: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub tile_width: u16,
    pub tile_height: u16,
    /// Extra rows of tiles whose previews are requested ahead of scrolling.
    #[serde(default = "default_preload_rows")]
    pub preload_rows: usize,
}

fn default_preload_rows() -> usize {
    1
}

impl GalleryConfig {
    const TILE_WIDTH: (u16, u16) = (4, 120);
    const TILE_HEIGHT: (u16, u16) = (3, 60);

    /// Keep tile sizes inside what a terminal grid can lay out.
    fn clamp_tile_size(&mut self) {
        self.tile_width = self.tile_width.clamp(Self::TILE_WIDTH.0, Self::TILE_WIDTH.1);
        self.tile_height = self.tile_height.clamp(Self::TILE_HEIGHT.0, Self::TILE_HEIGHT.1);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Placeholder URL template; `{id}` is replaced by the photo id.
    pub placeholder_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    pub service_url: String,
    pub caption: String,
    /// Where the photo folder is published. Local paths are shared when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecorationConfig {
    pub enabled: bool,
    pub glyph_count: usize,
    pub symbols: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub mode: String, // "auto", "light", "dark"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    pub next: String,
    pub prev: String,
    pub open: String,
    pub quit: String,
    pub share: String,
    pub next_filter: String,
    pub prev_filter: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            count: 144,
            folder: PathBuf::from("M"),
            base_name: "A (".to_string(),
            extension: ".JPG".to_string(),
            categories: vec![
                "portraits".into(),
                "ceremony".into(),
                "family".into(),
                "candid".into(),
            ],
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            tile_width: 24,
            tile_height: 12,
            preload_rows: default_preload_rows(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SHARE_SERVICE.to_string(),
            caption: DEFAULT_SHARE_CAPTION.to_string(),
            public_base_url: None,
        }
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            glyph_count: DEFAULT_GLYPH_COUNT,
            symbols: DEFAULT_SYMBOLS.to_vec(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: "auto".to_string(),
        }
    }
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            next: "l".to_string(),
            prev: "h".to_string(),
            open: "Enter".to_string(),
            quit: "q".to_string(),
            share: "s".to_string(),
            next_filter: "Tab".to_string(),
            prev_filter: "BackTab".to_string(),
        }
    }
}

impl KeybindingsConfig {
    /// Parse a keybinding string into a KeyCode
    pub fn parse_key(s: &str) -> Option<KeyCode> {
        let s = s.trim();

        // Single character
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::Char(ch));
        }

        // Named keys (case insensitive)
        match s.to_lowercase().as_str() {
            "enter" | "return" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "backtab" | "shift+tab" | "s-tab" => Some(KeyCode::BackTab),
            "space" => Some(KeyCode::Char(' ')),
            "backspace" => Some(KeyCode::Backspace),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" | "pgup" => Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => Some(KeyCode::PageDown),
            "up" | "arrow_up" => Some(KeyCode::Up),
            "down" | "arrow_down" => Some(KeyCode::Down),
            "left" | "arrow_left" => Some(KeyCode::Left),
            "right" | "arrow_right" => Some(KeyCode::Right),
            other => other
                .strip_prefix('f')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=12).contains(n))
                .map(KeyCode::F),
        }
    }

    /// Check if a KeyCode matches a keybinding
    pub fn matches(&self, key: KeyCode, binding: &str) -> bool {
        Self::parse_key(binding) == Some(key)
    }
}

impl Config {
    /// Return the path to the configuration file.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("com", "mrmattias", "keepsake")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from file, creating default if missing or corrupt.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(mut config) => {
                    config.gallery.clamp_tile_size();
                    Ok(config)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}",
                        path.display(),
                        e
                    );
                    eprintln!("Using default configuration.");
                    warn!(path = %path.display(), error = %e, "config unparsable, using defaults");
                    let config = Config::default();
                    config.save_to(path)?;
                    Ok(config)
                }
            }
        } else {
            // Create default config.
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Strict read: a missing or unparsable file is an error and nothing is rewritten.
    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.gallery.clamp_tile_size();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Catalog naming convention, with `~` expanded in the folder.
    pub fn catalog_spec(&self) -> CatalogSpec {
        CatalogSpec {
            count: self.catalog.count,
            folder: expand_tilde(&self.catalog.folder),
            base_name: self.catalog.base_name.clone(),
            extension: self.catalog.extension.clone(),
            categories: self.catalog.categories.clone(),
        }
    }
}
