use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::render::GlyphTexture;

/// Glyph variant drawn for a marker.
///
/// Raw shape codes and names coming from untyped sources are decoded through
/// `TryFrom<u8>` / `FromStr`; unknown values are an `InvariantViolation`
/// rather than a silent fallback to some default glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MarkerShape {
    #[default]
    Circle,
    Cross,
}

impl MarkerShape {
    pub const ALL: [Self; 2] = [Self::Circle, Self::Cross];

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Circle => 0,
            Self::Cross => 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Cross => "cross",
        }
    }

    #[must_use]
    pub const fn glyph(self) -> GlyphTexture {
        match self {
            Self::Circle => GlyphTexture::MarkerCircle,
            Self::Cross => GlyphTexture::MarkerCross,
        }
    }
}

impl TryFrom<u8> for MarkerShape {
    type Error = ChartError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.code() == code)
            .ok_or_else(|| ChartError::InvariantViolation(format!("invalid marker shape code {code}")))
    }
}

impl FromStr for MarkerShape {
    type Err = ChartError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ChartError::InvariantViolation(format!("invalid marker shape `{raw}`")))
    }
}

impl TryFrom<String> for MarkerShape {
    type Error = ChartError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
