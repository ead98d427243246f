//! Site configuration
//!
//! `folio.toml` tunes motion timing, the simulated viewport and the page
//! layout, and can replace the built-in content. Every field has a default,
//! so an empty (or missing) file yields the stock portfolio page.

use std::fs;
use std::path::Path;

use folio_animation::StaggerDirection;
use serde::{Deserialize, Serialize};

use crate::content::SiteContent;
use crate::error::{Result, SiteError};

/// Config file name looked up in a project directory
pub const CONFIG_FILE: &str = "folio.toml";

/// Root of `folio.toml`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub motion: MotionSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Replaces the built-in content when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SiteContent>,
}

/// Reveal timing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Delay between hero headline characters (ms)
    pub char_step_ms: u32,
    /// Delay between project cards (ms)
    pub card_step_ms: u32,
    /// Delay between skill tags (ms)
    pub skill_step_ms: u32,
    /// Visible fraction that triggers in-view reveals; unset means 0.3
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    pub char_duration_ms: u32,
    /// Spring bounce of the headline characters (0 = critically damped)
    pub char_bounce: f32,
    pub char_rise_px: f32,
    pub card_rise_px: f32,
    pub card_duration_ms: u32,
    pub card_order: StaggerDirection,
    pub subtitle_delay_ms: u32,
    pub subtitle_duration_ms: u32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            char_step_ms: 50,
            card_step_ms: 50,
            skill_step_ms: 50,
            threshold: None,
            char_duration_ms: 500,
            char_bounce: 0.1,
            char_rise_px: 40.0,
            card_rise_px: 24.0,
            card_duration_ms: 300,
            card_order: StaggerDirection::Forward,
            subtitle_delay_ms: 800,
            subtitle_duration_ms: 300,
        }
    }
}

/// Simulated browser viewport
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Page layout metrics (px)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Gallery columns
    pub columns: usize,
    pub card_height: f32,
    /// Vertical padding of every section below the hero
    pub section_padding: f32,
    pub skill_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: 3,
            card_height: 320.0,
            section_padding: 96.0,
            skill_height: 32.0,
        }
    }
}

impl SiteConfig {
    /// Load `folio.toml` from a directory
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| SiteError::ConfigRead {
            path: config_path.clone(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| SiteError::ConfigParse {
            path: config_path,
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write `folio.toml` into a directory
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_path = path.join(CONFIG_FILE);
        let content = self.to_toml()?;
        fs::write(&config_path, content).map_err(|source| SiteError::ConfigWrite {
            path: config_path,
            source,
        })
    }

    /// Content to render: the override, or the built-in page
    pub fn content(&self) -> SiteContent {
        self.content.clone().unwrap_or_default()
    }
}
