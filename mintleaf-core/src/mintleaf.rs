//! Mintleaf root directory management.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};

use crate::contact::PhoneRules;
use crate::error::{MintleafError, MintleafResult};
use crate::mintleaf_config::MintleafConfig;
use crate::unit::Unit;

#[derive(Debug, Clone)]
pub struct Mintleaf {
    config: MintleafConfig,
    config_path: PathBuf,
}

impl Mintleaf {
    /// Load the global config, writing a commented default on first run.
    /// `MINTLEAF_*` environment variables override file values.
    pub fn load() -> MintleafResult<Self> {
        let config_path = MintleafConfig::config_path()?;

        if !config_path.exists() {
            MintleafConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> MintleafResult<Self> {
        let config: MintleafConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("MINTLEAF")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| MintleafError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MintleafError::Config(e.to_string()))?;

        tracing::debug!(path = %config_path.display(), units_dir = %config.units_dir.display(), "loaded config");

        Ok(Mintleaf {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn units_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.units_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The units directory as configured, keeping `~` unexpanded.
    pub fn display_path(&self) -> PathBuf {
        self.config.units_dir.clone()
    }

    pub fn phone_rules(&self) -> &PhoneRules {
        &self.config.phone
    }

    /// Discover units by scanning units_dir for subdirectories with a
    /// `.mintleaf` directory. Units whose settings fail to load are skipped.
    pub fn units(&self) -> Vec<Unit> {
        let Ok(entries) = std::fs::read_dir(self.units_path()) else {
            return Vec::new();
        };

        let mut units: Vec<Unit> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && Unit::is_unit_dir(path))
            .filter_map(|path| match Unit::load(&path) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unit");
                    None
                }
            })
            .collect();

        units.sort_by(|a, b| a.name.cmp(&b.name));
        units
    }

    /// Load a unit by directory name. The directory need not be initialized
    /// yet; defaults apply until settings are saved.
    pub fn unit(&self, name: &str) -> MintleafResult<Unit> {
        let path = self.units_path().join(name);
        if !path.is_dir() {
            return Err(MintleafError::UnitNotFound(name.to_string()));
        }
        Unit::load(&path)
    }

    pub fn default_unit(&self) -> Option<Unit> {
        let name = self.config.default_unit.as_ref()?;
        self.unit(name).ok()
    }

    /// Set the default unit if one isn't already configured.
    /// Returns true if the default was set.
    pub fn set_default_unit_if_unset(&mut self, name: &str) -> MintleafResult<bool> {
        if self.config.default_unit.is_some() {
            return Ok(false);
        }
        self.config.default_unit = Some(name.to_string());
        self.config.save_to(&self.config_path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ReservationSettings;

    fn setup() -> (tempfile::TempDir, Mintleaf) {
        let dir = tempfile::tempdir().unwrap();
        let units = dir.path().join("units");
        std::fs::create_dir_all(&units).unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                "units_dir = {:?}\n\n[phone]\ncountry_code = \"+43\"\ntrunk_prefix = \"0\"\n",
                units.to_string_lossy()
            ),
        )
        .unwrap();
        let mintleaf = Mintleaf::load_from(&config_path).unwrap();
        (dir, mintleaf)
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        MintleafConfig::create_default_config(&path).unwrap();

        let mintleaf = Mintleaf::load_from(&path).unwrap();
        assert_eq!(mintleaf.display_path(), PathBuf::from("~/mintleaf"));
        assert_eq!(mintleaf.phone_rules(), &PhoneRules::default());
        assert!(mintleaf.default_unit().is_none());
    }

    #[test]
    fn reads_phone_rules() {
        let (_dir, mintleaf) = setup();
        assert_eq!(mintleaf.phone_rules().country_code, "+43");
        assert_eq!(mintleaf.phone_rules().normalize("0664 1234567"), "+436641234567");
    }

    #[test]
    fn discovers_only_initialized_units() {
        let (_dir, mintleaf) = setup();
        let units = mintleaf.units_path();

        ReservationSettings::default().save(&units.join("terrace")).unwrap();
        ReservationSettings::default().save(&units.join("bistro")).unwrap();
        std::fs::create_dir_all(units.join("scratch")).unwrap();

        let names: Vec<String> = mintleaf.units().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["bistro", "terrace"]);
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let (_dir, mintleaf) = setup();
        assert!(matches!(
            mintleaf.unit("nowhere"),
            Err(MintleafError::UnitNotFound(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn sets_default_unit_once() {
        let (dir, mut mintleaf) = setup();
        std::fs::create_dir_all(mintleaf.units_path().join("bistro")).unwrap();

        assert!(mintleaf.set_default_unit_if_unset("bistro").unwrap());
        assert!(!mintleaf.set_default_unit_if_unset("terrace").unwrap());

        let reloaded = Mintleaf::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(reloaded.default_unit().map(|u| u.name), Some("bistro".to_string()));
    }
}
