use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "cubedeck";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Tween slide changes; `false` switches to instant cuts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<bool>,

    /// Draw the cube field behind the slides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<bool>,

    /// 1-indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `cubedeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# cubedeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("slate")
    }

    pub fn animations(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.animations)
            .unwrap_or(true)
    }

    pub fn background(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.background)
            .unwrap_or(true)
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.theme" => {
                match value {
                    "slate" | "light" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'slate' or 'light'."),
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.animations" => {
                defaults.animations = Some(parse_bool(key, value)?);
            }
            "defaults.background" => {
                defaults.background = Some(parse_bool(key, value)?);
            }
            "defaults.start_slide" => {
                let slide = value.parse::<usize>().ok().filter(|n| *n >= 1).ok_or_else(|| {
                    anyhow::anyhow!("Invalid start_slide: {value}. Must be a slide number (1 or more).")
                })?;
                defaults.start_slide = Some(slide);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.animations, defaults.background, defaults.start_slide"
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}
