//! Per-unit reservation configuration.
//!
//! Stored in each unit's `.mintleaf/reservation.toml`. Every field has a
//! default, so a partial file merges onto the defaults.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::availability::BlackoutSet;
use crate::constants::{DEFAULT_WINDOW_FROM, DEFAULT_WINDOW_TO, TIME_FORMAT};
use crate::error::{MintleafError, MintleafResult};
use crate::store::remote::Remote;
use crate::theme::ThemeConfig;

const SETTINGS_DIR: &str = ".mintleaf";
const SETTINGS_FILE: &str = "reservation.toml";

/// Opening and closing wall-clock times between which guests may book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookableWindow {
    #[serde(with = "hhmm")]
    pub from: NaiveTime,
    #[serde(with = "hhmm")]
    pub to: NaiveTime,
}

impl Default for BookableWindow {
    fn default() -> Self {
        BookableWindow {
            from: NaiveTime::parse_from_str(DEFAULT_WINDOW_FROM, TIME_FORMAT).unwrap_or_default(),
            to: NaiveTime::parse_from_str(DEFAULT_WINDOW_TO, TIME_FORMAT).unwrap_or_default(),
        }
    }
}

impl BookableWindow {
    /// A booking may start at opening time but not at closing time.
    pub fn accepts_start(&self, time: NaiveTime) -> bool {
        self.from <= time && time < self.to
    }

    pub fn accepts_end(&self, time: NaiveTime) -> bool {
        self.from < time && time <= self.to
    }
}

impl std::fmt::Display for BookableWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}–{}", self.from.format(TIME_FORMAT), self.to.format(TIME_FORMAT))
    }
}

/// Choice lists offered on the guest form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestFormOptions {
    pub occasion_options: Vec<String>,
    pub heard_from_options: Vec<String>,
}

impl Default for GuestFormOptions {
    fn default() -> Self {
        GuestFormOptions {
            occasion_options: ["Brunch", "Lunch", "Dinner", "Birthday", "Drinks", "Other"]
                .map(String::from)
                .to_vec(),
            heard_from_options: [
                "Google",
                "Facebook / Instagram",
                "Recommendation",
                "Walked past",
                "Other",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Reservation configuration for a single unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationSettings {
    pub blackout_dates: BlackoutSet,
    pub bookable_window: BookableWindow,
    /// Maximum guests per day across all bookings. `None` means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_capacity: Option<u32>,
    #[serde(with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub kitchen_open: Option<NaiveTime>,
    #[serde(with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub bar_close: Option<NaiveTime>,
    pub guest_form: GuestFormOptions,
    pub theme: ThemeConfig,
    /// External store that bookings are written to. Local files when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<Remote>,
}

impl ReservationSettings {
    /// Load settings from `<unit_dir>/.mintleaf/reservation.toml`, falling back
    /// to defaults when the file does not exist.
    pub fn load(unit_dir: &Path) -> MintleafResult<Self> {
        let path = unit_dir.join(SETTINGS_DIR).join(SETTINGS_FILE);

        let settings = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let settings: ReservationSettings =
                toml::from_str(&content).map_err(|e| MintleafError::Config(e.to_string()))?;
            tracing::debug!(path = %path.display(), "loaded reservation settings");
            settings
        } else {
            tracing::debug!(path = %path.display(), "no reservation settings, using defaults");
            Self::default()
        };

        settings.check()?;
        Ok(settings)
    }

    /// Save settings to `<unit_dir>/.mintleaf/reservation.toml`.
    pub fn save(&self, unit_dir: &Path) -> MintleafResult<()> {
        let dir = unit_dir.join(SETTINGS_DIR);
        std::fs::create_dir_all(&dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| MintleafError::Config(e.to_string()))?;
        std::fs::write(dir.join(SETTINGS_FILE), content)?;

        Ok(())
    }

    fn check(&self) -> MintleafResult<()> {
        let window = &self.bookable_window;
        if window.from >= window.to {
            return Err(MintleafError::Config(format!(
                "bookable window must open before it closes (got {window})"
            )));
        }
        if self.daily_capacity == Some(0) {
            return Err(MintleafError::Config(
                "daily_capacity must be at least 1; remove it for no limit".into(),
            ));
        }
        Ok(())
    }

    /// Occasion preselected on a fresh booking form.
    pub fn default_occasion(&self) -> String {
        self.guest_form
            .occasion_options
            .first()
            .cloned()
            .unwrap_or_default()
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::constants::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .map_err(|_| D::Error::custom(format!("'{raw}' is not an HH:MM time")))
    }
}

mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => super::hhmm::serialize(t, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::hhmm")] NaiveTime);

        Ok(Option::<Wrapper>::deserialize(d)?.map(|Wrapper(t)| t))
    }
}
