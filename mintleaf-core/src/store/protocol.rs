//! JSON protocol spoken with store provider binaries over stdin/stdout.
//!
//! One request per process: the provider reads a single [`Request`] line and
//! writes a single [`Response`].

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::booking::BookingRecord;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CreateBooking,
    BookedHeadcount,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Store a booking. The provider answers with the reference code it kept.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Provider-specific keys from the unit's `[remote]` table.
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub booking: BookingRecord,
}

impl ProviderCommand for CreateBooking {
    type Response = String;
    fn command() -> Command {
        Command::CreateBooking
    }
}

/// Sum of guests already booked on a day.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookedHeadcount {
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl ProviderCommand for BookedHeadcount {
    type Response = u32;
    fn command() -> Command {
        Command::BookedHeadcount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape() {
        let mut remote_config = serde_json::Map::new();
        remote_config.insert("sheet_id".into(), "abc".into());
        let params = serde_json::to_value(BookedHeadcount {
            remote_config,
            date: "2024-06-14".into(),
        })
        .unwrap();
        let request = Request {
            command: BookedHeadcount::command(),
            params,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["command"], "booked_headcount");
        assert_eq!(json["params"]["sheet_id"], "abc");
        assert_eq!(json["params"]["date"], "2024-06-14");
    }

    #[test]
    fn parses_tagged_responses() {
        let ok: Response<String> =
            serde_json::from_str(r#"{"status":"success","data":"AB12CD34"}"#).unwrap();
        assert!(matches!(ok, Response::Success { data } if data == "AB12CD34"));

        let err: Response<u32> =
            serde_json::from_str(r#"{"status":"error","error":"sheet locked"}"#).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "sheet locked"));
    }
}
