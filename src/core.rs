use crate::error::{ChartError, ChartResult};

pub use kurbo::{Point, Rect};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Straight-alpha RGBA8 color.
///
/// Serializes as a `"#RRGGBB"` or `"#RRGGBBAA"` hex string, matching the form
/// chart documents declare category color schemes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> ChartResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ChartError::validation(format!("invalid hex color '{s}'")));
        }
        let channel = |i: usize| -> ChartResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ChartError::validation(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: 255,
            }),
            8 => Ok(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(ChartError::validation(format!(
                "invalid hex color '{s}': expected 6 or 8 hex digits"
            ))),
        }
    }

    /// Same color with alpha scaled by `factor` (clamped to 0..1).
    pub fn with_alpha(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: ((self.a as f32) * f).round() as u8,
            ..self
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#4ECDC4").unwrap(), Color::rgb(78, 205, 196));
        assert_eq!(
            Color::from_hex("4ECDC480").unwrap(),
            Color::rgba(78, 205, 196, 128)
        );
    }

    #[test]
    fn hex_parse_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let c = Color::rgb(93, 143, 249);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#5D8FF9\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn with_alpha_scales_and_clamps() {
        let c = Color::rgb(10, 20, 30).with_alpha(0.3);
        assert_eq!(c.a, 77);
        assert_eq!(Color::rgb(0, 0, 0).with_alpha(2.0).a, 255);
    }
}
