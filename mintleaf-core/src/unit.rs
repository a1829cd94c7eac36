//! A unit is one venue: a directory holding its reservation settings and,
//! for local storage, its bookings.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{MintleafError, MintleafResult};
use crate::leave::LeaveStore;
use crate::settings::ReservationSettings;
use crate::store::UnitStore;
use crate::store::local::LocalStore;

const MARKER_DIR: &str = ".mintleaf";

#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    pub dir: PathBuf,
    pub settings: ReservationSettings,
}

impl Unit {
    pub fn load(dir: &Path) -> MintleafResult<Self> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MintleafError::UnitNotFound(dir.display().to_string()))?
            .to_string();
        let settings = ReservationSettings::load(dir)?;

        Ok(Unit {
            name,
            dir: dir.to_path_buf(),
            settings,
        })
    }

    pub fn is_unit_dir(dir: &Path) -> bool {
        dir.join(MARKER_DIR).is_dir()
    }

    pub fn save_settings(&self) -> MintleafResult<()> {
        self.settings.save(&self.dir)?;
        tracing::info!(unit = %self.name, "saved reservation settings");
        Ok(())
    }

    /// The remote provider when one is configured, local files otherwise.
    pub fn store(&self) -> UnitStore {
        match &self.settings.remote {
            Some(remote) => UnitStore::Remote(remote.clone()),
            None => UnitStore::Local(LocalStore::new(&self.dir)),
        }
    }

    pub fn leave_store(&self) -> LeaveStore {
        LeaveStore::new(&self.dir)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
