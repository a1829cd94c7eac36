use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::BookingRecord;
use crate::date_key::DateKey;
use crate::error::MintleafResult;
use crate::store::BookingStore;
use crate::store::protocol::{BookedHeadcount, CreateBooking};
use crate::store::provider::Provider;

/// Provider-specific keys, passed through untouched.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct RemoteConfig(pub HashMap<String, toml::Value>);

impl From<&RemoteConfig> for serde_json::Map<String, serde_json::Value> {
    fn from(config: &RemoteConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// External booking store, configured as a `[remote]` table in the unit's
/// reservation settings.
///
/// ```toml
/// [remote]
/// provider = "sheets"
/// sheet_id = "1AbC..."
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    pub fn new(provider: Provider, config: RemoteConfig) -> Self {
        Remote { provider, config }
    }

    fn remote_config(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::from(&self.config)
    }
}

impl BookingStore for Remote {
    async fn create_booking(&self, record: &BookingRecord) -> MintleafResult<String> {
        self.provider
            .call(CreateBooking {
                remote_config: self.remote_config(),
                booking: record.clone(),
            })
            .await
    }

    async fn booked_headcount(&self, day: NaiveDate) -> MintleafResult<u32> {
        self.provider
            .call(BookedHeadcount {
                remote_config: self.remote_config(),
                date: DateKey::from_date(day)?.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flattened_remote_table() {
        let remote: Remote = toml::from_str(
            r#"
provider = "sheets"
sheet_id = "abc"
tab = 2
"#,
        )
        .unwrap();

        assert_eq!(remote.provider.name(), "sheets");
        let json = remote.remote_config();
        assert_eq!(json["sheet_id"], "abc");
        assert_eq!(json["tab"], 2);
        assert!(!json.contains_key("provider"));
    }
}
