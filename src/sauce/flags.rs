//! The SAUCE Flags byte of character and binary text files.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

const NON_BLINK: u8 = 0b0000_0001;
const LETTER_SPACING: u8 = 0b0000_0110;
const ASPECT_RATIO: u8 = 0b0001_1000;

const NO_PREFERENCE: &str = "no preference";
const INVALID: &str = "invalid value";

/// Letter spacing, bits 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LetterSpacing {
    /// 00
    #[default]
    NoPreference,
    /// 01, 8 pixel font.
    EightPixel,
    /// 10, 9 pixel font.
    NinePixel,
    /// 11
    Invalid,
}

impl LetterSpacing {
    /// Interpretation of the bits.
    #[must_use]
    pub fn info(self) -> &'static str {
        match self {
            Self::NoPreference => NO_PREFERENCE,
            Self::EightPixel => "select 8 pixel font",
            Self::NinePixel => "select 9 pixel font",
            Self::Invalid => INVALID,
        }
    }
}

/// Aspect ratio, bits 3-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    /// 00
    #[default]
    NoPreference,
    /// 01, pixels were meant to be stretched to a legacy display.
    Stretch,
    /// 10, square pixels.
    Square,
    /// 11
    Invalid,
}

impl AspectRatio {
    /// Interpretation of the bits.
    #[must_use]
    pub fn info(self) -> &'static str {
        match self {
            Self::NoPreference => NO_PREFERENCE,
            Self::Stretch => "stretch pixels",
            Self::Square => "square pixels",
            Self::Invalid => INVALID,
        }
    }
}

/// Interpreted Flags byte.
///
/// ```
/// use retrotext::sauce::{AnsiFlags, AspectRatio, LetterSpacing};
///
/// let flags = AnsiFlags::from_sauce(0b0001_0101);
/// assert!(flags.non_blink);
/// assert_eq!(flags.letter_spacing, LetterSpacing::NinePixel);
/// assert_eq!(flags.aspect_ratio, AspectRatio::Square);
/// assert_eq!(flags.to_string(), "non-blink mode, select 9 pixel font, square pixels");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AnsiFlags {
    /// The raw byte.
    pub value: u8,
    /// iCE colors: the blink bit selects bright backgrounds instead.
    pub non_blink: bool,
    /// Font width preference.
    pub letter_spacing: LetterSpacing,
    /// Pixel shape preference.
    pub aspect_ratio: AspectRatio,
}

impl AnsiFlags {
    /// Interpret a Flags byte. Bits 5-7 are reserved and ignored.
    #[must_use]
    pub fn from_sauce(value: u8) -> Self {
        let letter_spacing = match (value & LETTER_SPACING) >> 1 {
            0 => LetterSpacing::NoPreference,
            1 => LetterSpacing::EightPixel,
            2 => LetterSpacing::NinePixel,
            _ => LetterSpacing::Invalid,
        };
        let aspect_ratio = match (value & ASPECT_RATIO) >> 3 {
            0 => AspectRatio::NoPreference,
            1 => AspectRatio::Stretch,
            2 => AspectRatio::Square,
            _ => AspectRatio::Invalid,
        };
        Self {
            value,
            non_blink: value & NON_BLINK != 0,
            letter_spacing,
            aspect_ratio,
        }
    }

    /// Interpretation of the blink bit.
    #[must_use]
    pub fn blink_info(self) -> &'static str {
        if self.non_blink {
            "non-blink mode"
        } else {
            "blink mode"
        }
    }
}

/// Lists the interpretations that express a preference, or nothing when
/// the byte is zero.
impl fmt::Display for AnsiFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0 {
            return Ok(());
        }
        let infos: Vec<&str> = [self.blink_info(), self.letter_spacing.info(), self.aspect_ratio.info()]
            .into_iter()
            .filter(|info| *info != NO_PREFERENCE)
            .collect();
        f.write_str(&infos.join(", "))
    }
}

impl Serialize for AnsiFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AnsiFlags", 5)?;
        s.serialize_field("decimal", &self.value)?;
        s.serialize_field("binary", &format!("{:05b}", self.value))?;
        s.serialize_field("nonBlinkMode", self.blink_info())?;
        s.serialize_field("letterSpacing", self.letter_spacing.info())?;
        s.serialize_field("aspectRatio", self.aspect_ratio.info())?;
        s.end()
    }
}
