//! Tracker colours and their hex storage form.
//!
//! Colours are stored as `#RRGGBB`. Reading tolerates a missing `#` and
//! lower-case digits; anything else falls back to [`Color::FALLBACK`] with a
//! warning instead of failing the read.

use crate::libs::messages::Message;
use crate::msg_warning;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color: {0}")]
pub struct ParseColorError(String);

impl Color {
    /// Used when a stored value cannot be parsed.
    pub const FALLBACK: Color = Color::rgb(0xAE, 0xAF, 0xB4);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Lenient parse used on the read path.
    pub fn from_hex(value: &str) -> Color {
        value.parse().unwrap_or_else(|_| {
            msg_warning!(Message::InvalidColor(value.to_string()));
            Color::FALLBACK
        })
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::FALLBACK
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(value.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).map_err(|_| ParseColorError(value.to_string()));

        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Color::from_hex(&value)
    }
}
