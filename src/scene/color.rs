use crate::foundation::core::Rgb8;
use crate::foundation::error::{DitherError, DitherResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

impl Rgb8 {
    /// Parse `#rrggbb`, `#rgb` (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> DitherResult<Self> {
        parse_hex(s).map_err(DitherError::validation)
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = DitherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj { r: u8, g: u8, b: u8 },
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::new(r, g, b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have exactly 3 entries ([r,g,b], 0-255)",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match digits.len() {
        6 => Ok(Rgb8::new(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        3 => {
            let nib = |i: usize| hex_byte(&digits[i..i + 1]).map(|v| v * 17);
            Ok(Rgb8::new(nib(0)?, nib(1)?, nib(2)?))
        }
        _ => Err("hex color must be #RRGGBB or #RGB (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
