use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".ybx.toml") }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Use Nerd Font icons in tree output by default.
    #[serde(default)]
    pub nerd_font: bool,
    /// Binary used to talk to yabai; override when it is not on PATH.
    #[serde(default = "default_yabai_program")]
    pub yabai_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nerd_font: false,
            yabai_program: default_yabai_program(),
        }
    }
}

fn default_yabai_program() -> String { "yabai".to_string() }

impl Config {
    /// Loads the config file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_when_file_is_missing() {
        let config = Config::load(Path::new("/nonexistent/.ybx.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str("nerd_font = true").unwrap();
        assert!(config.nerd_font);
        assert_eq!(config.yabai_program, "yabai");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Config>("gaps = 10").is_err());
    }
}
