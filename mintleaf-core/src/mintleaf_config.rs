//! Global mintleaf configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contact::PhoneRules;
use crate::error::{MintleafError, MintleafResult};

static DEFAULT_UNITS_PATH: &str = "~/mintleaf";

fn default_units_dir() -> PathBuf {
    PathBuf::from(DEFAULT_UNITS_PATH)
}

fn is_default_units_dir(p: &PathBuf) -> bool {
    *p == default_units_dir()
}

/// Global configuration at ~/.config/mintleaf/config.toml
///
/// Reservation settings for a venue live in each unit's
/// `.mintleaf/reservation.toml` instead.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MintleafConfig {
    #[serde(default = "default_units_dir", skip_serializing_if = "is_default_units_dir")]
    pub units_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_unit: Option<String>,

    #[serde(default)]
    pub phone: PhoneRules,
}

impl Default for MintleafConfig {
    fn default() -> Self {
        MintleafConfig {
            units_dir: default_units_dir(),
            default_unit: None,
            phone: PhoneRules::default(),
        }
    }
}

impl MintleafConfig {
    pub fn config_path() -> MintleafResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MintleafError::Config("Could not determine config directory".into()))?
            .join("mintleaf");

        Ok(config_dir.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> MintleafResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| MintleafError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| MintleafError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MintleafResult<()> {
        let contents = format!(
            "\
# mintleaf configuration

# Where your units (one directory per venue) live:
# units_dir = \"{DEFAULT_UNITS_PATH}\"

# Unit used when --unit is not given:
# default_unit = \"bistro\"

# How phone numbers without an international prefix are read:
# [phone]
# country_code = \"+36\"
# trunk_prefix = \"06\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MintleafError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MintleafError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
