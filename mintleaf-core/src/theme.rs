//! Booking page theme and WCAG contrast checks.
//!
//! The theme is a plain value handed to whatever renders the booking page;
//! nothing here applies it globally.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_TEXT_CONTRAST;
use crate::error::{MintleafError, MintleafResult};

/// An sRGB color parsed from strict `#RRGGBB` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Parse `#RRGGBB`. Shorthand (`#fff`) and named colors are rejected.
    pub fn from_hex(hex: &str) -> MintleafResult<Self> {
        let invalid = || MintleafError::InvalidColor(hex.to_string());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG 2.x relative luminance, in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        let linear = |channel: u8| {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

/// Contrast ratio between two colors, in `[1, 21]`. Order does not matter.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Contrast ratio between two `#RRGGBB` strings.
pub fn contrast_ratio_hex(a: &str, b: &str) -> MintleafResult<f64> {
    Ok(contrast_ratio(Rgb::from_hex(a)?, Rgb::from_hex(b)?))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radius {
    Sm,
    Md,
    #[default]
    Lg,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elevation {
    Low,
    #[default]
    Mid,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeScale {
    S,
    #[default]
    M,
    L,
}

/// Named color roles plus style knobs for a unit's booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub primary: String,
    pub surface: String,
    pub background: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub accent: String,
    pub success: String,
    pub danger: String,
    pub radius: Radius,
    pub elevation: Elevation,
    pub typography_scale: TypeScale,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            primary: "#16a34a".into(),
            surface: "#ffffff".into(),
            background: "#f9fafb".into(),
            text_primary: "#1f2937".into(),
            text_secondary: "#4b5563".into(),
            accent: "#10b981".into(),
            success: "#22c55e".into(),
            danger: "#ef4444".into(),
            radius: Radius::default(),
            elevation: Elevation::default(),
            typography_scale: TypeScale::default(),
        }
    }
}

/// A foreground/background pair checked for readability.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastCheck {
    pub label: &'static str,
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
}

impl ContrastCheck {
    pub fn is_below(&self, threshold: f64) -> bool {
        self.ratio < threshold
    }
}

impl ThemeConfig {
    pub fn color(&self, hex: &str) -> MintleafResult<Rgb> {
        Rgb::from_hex(hex)
    }

    /// Contrast ratios for every text/background pairing the booking page uses.
    pub fn contrast_report(&self) -> MintleafResult<Vec<ContrastCheck>> {
        let white = Rgb::WHITE.to_hex();
        let pairs: [(&'static str, &str, &str); 4] = [
            ("surface / primary text", &self.text_primary, &self.surface),
            ("background / primary text", &self.text_primary, &self.background),
            ("surface / secondary text", &self.text_secondary, &self.surface),
            ("button / white text", &white, &self.primary),
        ];

        pairs
            .into_iter()
            .map(|(label, fg, bg)| {
                Ok(ContrastCheck {
                    label,
                    foreground: fg.to_string(),
                    background: bg.to_string(),
                    ratio: contrast_ratio_hex(fg, bg)?,
                })
            })
            .collect()
    }

    /// Pairs whose ratio falls below `threshold`.
    pub fn low_contrast_pairs(&self, threshold: f64) -> MintleafResult<Vec<ContrastCheck>> {
        Ok(self
            .contrast_report()?
            .into_iter()
            .filter(|check| check.is_below(threshold))
            .collect())
    }

    /// Pairs below the WCAG AA body-text threshold.
    pub fn contrast_warnings(&self) -> MintleafResult<Vec<ContrastCheck>> {
        self.low_contrast_pairs(MIN_TEXT_CONTRAST)
    }
}
