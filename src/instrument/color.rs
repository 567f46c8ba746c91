// Display color for an instrument's grid cells

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color, serialized as a `#rrggbb` string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color([u8; 3]);

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// CSS-style hex value, e.g. `#4a90d9`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| format!("Color '{}' must start with '#'", value))?;

        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Color '{}' must have the form #rrggbb", value));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| format!("Color '{}' contains invalid hex digits", value))
        };

        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
