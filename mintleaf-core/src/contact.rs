//! Phone and email canonicalization before a booking is stored.
//!
//! Normalization only fixes the shape of the input. It never fails and never
//! checks that a number is dialable; form validation decides what is acceptable.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COUNTRY_CODE, DEFAULT_TRUNK_PREFIX};

/// Dialing conventions for numbers entered without an international prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRules {
    /// International prefix including the `+`, e.g. `+36`.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Domestic trunk prefix replaced by the country code, e.g. `06`.
    #[serde(default = "default_trunk_prefix")]
    pub trunk_prefix: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_trunk_prefix() -> String {
    DEFAULT_TRUNK_PREFIX.to_string()
}

impl Default for PhoneRules {
    fn default() -> Self {
        PhoneRules {
            country_code: default_country_code(),
            trunk_prefix: default_trunk_prefix(),
        }
    }
}

impl PhoneRules {
    /// Best-effort E.164-like form of `input`.
    ///
    /// Whitespace, hyphens and parentheses are stripped. A leading `00` becomes
    /// `+`, a leading trunk prefix becomes the country code, and anything else
    /// without a `+` gets the country code prepended.
    pub fn normalize(&self, input: &str) -> String {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();

        if compact.is_empty() {
            return compact;
        }

        if let Some(rest) = compact.strip_prefix("00") {
            return format!("+{rest}");
        }

        if !self.trunk_prefix.is_empty() {
            if let Some(rest) = compact.strip_prefix(self.trunk_prefix.as_str()) {
                return format!("{}{}", self.country_code, rest);
            }
        }

        if compact.starts_with('+') {
            compact
        } else {
            format!("{}{}", self.country_code, compact)
        }
    }
}

/// Normalize a phone number with the default (Hungarian) rules.
pub fn normalize_phone(input: &str) -> String {
    PhoneRules::default().normalize(input)
}

pub fn normalize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Contact details as they are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_e164: String,
    pub email: String,
}

impl Contact {
    pub fn normalized(phone: &str, email: &str, rules: &PhoneRules) -> Self {
        Contact {
            phone_e164: rules.normalize(phone),
            email: normalize_email(email),
        }
    }
}
