//! SAUCE DataType and FileType categories and the meaning of TInfo1-3.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The SAUCE DataType byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    /// Undefined, value 0.
    #[default]
    None,
    /// Plain or ANSI text, value 1.
    Character,
    /// Bitmap graphic or animation, value 2.
    Bitmap,
    /// Vector graphic, value 3.
    Vector,
    /// Audio or music, value 4.
    Audio,
    /// Raw text mode memory copy, value 5.
    BinaryText,
    /// Extended binary text, value 6.
    XBin,
    /// Compressed archive, value 7.
    Archive,
    /// Executable program, value 8.
    Executable,
    /// Any value past 8.
    Unknown(u8),
}

impl DataType {
    /// Interpret a DataType byte.
    #[must_use]
    pub fn from_sauce(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Character,
            2 => Self::Bitmap,
            3 => Self::Vector,
            4 => Self::Audio,
            5 => Self::BinaryText,
            6 => Self::XBin,
            7 => Self::Archive,
            8 => Self::Executable,
            _ => Self::Unknown(value),
        }
    }

    /// The byte stored in the record.
    #[must_use]
    pub fn to_sauce(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Character => 1,
            Self::Bitmap => 2,
            Self::Vector => 3,
            Self::Audio => 4,
            Self::BinaryText => 5,
            Self::XBin => 6,
            Self::Archive => 7,
            Self::Executable => 8,
            Self::Unknown(value) => value,
        }
    }

    /// Human readable category.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "undefined",
            Self::Character => "text or character stream",
            Self::Bitmap => "bitmap graphic or animation",
            Self::Vector => "vector graphic",
            Self::Audio => "audio or music",
            Self::BinaryText => "binary text",
            Self::XBin => "extended binary text",
            Self::Archive => "archive",
            Self::Executable => "executable",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DataType", 2)?;
        s.serialize_field("type", &self.to_sauce())?;
        s.serialize_field("name", self.name())?;
        s.end()
    }
}

// (short name, description) pairs indexed by the FileType byte.

const CHARACTER: [(&str, &str); 9] = [
    ("ASCII", "ASCII text"),
    ("ANSi", "ANSI color text"),
    ("ANSiMation", "ANSIMation"),
    ("RIP", "RIPScript"),
    ("PCBoard", "PCBoard color text"),
    ("Avatar", "Avatar color text"),
    ("HTML", "HTML markup"),
    ("Source", "Programming source code"),
    ("TundraDraw", "TundraDraw color text"),
];

const CHARACTER_DETAILS: [&str; 9] = [
    "ASCII text file with no formatting codes or color codes.",
    "ANSI text file with coloring codes and cursor positioning.",
    "ANSIMation are ANSI text files that rely on fixed screen sizes.",
    "RIPScript are Remote Imaging Protocol graphics.",
    "PCBoard color codes and macros, and ANSI codes.",
    "Avatar color codes, and ANSi codes.",
    "HTML markup files.",
    "Source code for a programming language.",
    "TundraDraw files, like ANSI, but with a custom palette.",
];

const BITMAP: [(&str, &str); 14] = [
    ("GIF", "GIF image"),
    ("PCX", "ZSoft Paintbrush image"),
    ("LBM/IFF", "DeluxePaint image"),
    ("TGA", "Targa true color image"),
    ("FLI", "Autodesk Animator animation"),
    ("FLC", "Autodesk Animator animation"),
    ("BMP", "BMP Windows/OS2 bitmap"),
    ("GL", "Grasp GL animation"),
    ("DL", "DL animation"),
    ("WPG", "WordPerfect graphic"),
    ("PNG", "PNG image"),
    ("JPG", "Jpeg photo"),
    ("MPG", "MPEG video"),
    ("AVI", "AVI video"),
];

const VECTOR: [(&str, &str); 4] = [
    ("DXF", "AutoDesk CAD vector graphic"),
    ("DWG", "AutoDesk CAD vector graphic"),
    ("WPG", "WordPerfect vector graphic"),
    ("3DS", "3D Studio vector graphic"),
];

const AUDIO: [(&str, &str); 25] = [
    ("MOD", "NoiseTracker module"),
    ("669", "Composer 669 module"),
    ("STM", "ScreamTracker module"),
    ("S3M", "ScreamTracker 3 module"),
    ("MTM", "MultiTracker module"),
    ("FAR", "Farandole Composer module"),
    ("ULT", "Ultra Tracker module"),
    ("AMF", "Dual Module Player module"),
    ("DMF", "X-Tracker module"),
    ("OKT", "Oktalyzer module"),
    ("ROL", "AdLib Visual Composer FM audio"),
    ("CMF", "Creative Music FM audio"),
    ("MID", "MIDI audio"),
    ("SADT", "SAdT composer FM audio"),
    ("VOC", "Creative Voice File"),
    ("WAV", "Waveform audio"),
    ("SMP8", "single channel 8-bit sample"),
    ("SMP8S", "stereo 8-bit sample"),
    ("SMP16", "single channel 16-bit sample"),
    ("SMP16S", "stereo 16-bit sample"),
    ("PATCH8", "8-bit patch file"),
    ("PATCH16", "16-bit patch file"),
    ("XM", "Extended Module"),
    ("HSC", "Hannes Seifert Composition FM audio"),
    ("IT", "Impulse Tracker module"),
];

const ARCHIVE: [(&str, &str); 10] = [
    ("ZIP", "ZIP compressed archive"),
    ("ARJ", "ARJ compressed archive"),
    ("LZH", "LHA compressed archive"),
    ("ARC", "ARC compressed archive"),
    ("TAR", "Tarball tape archive"),
    ("ZOO", "ZOO compressed archive"),
    ("RAR", "RAR compressed archive"),
    ("UC2", "UltraCompressor II compressed archive"),
    ("PAK", "PAK ARC compressed archive"),
    ("SQZ", "Squeeze It compressed archive"),
];

/// Audio FileType values of raw samples, whose TInfo1 is the sample rate.
const SAMPLES: std::ops::RangeInclusive<u8> = 16..=19;

/// The SAUCE FileType byte, read in the context of its [`DataType`].
///
/// ```
/// use retrotext::sauce::{DataType, FileType};
///
/// let file = FileType::new(DataType::Character, 1);
/// assert_eq!(file.name(), "ANSi");
/// assert_eq!(file.description(), "ANSI color text");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileType {
    data_type: DataType,
    value: u8,
}

impl FileType {
    /// Pair a FileType byte with the category that gives it meaning.
    #[must_use]
    pub fn new(data_type: DataType, value: u8) -> Self {
        Self { data_type, value }
    }

    /// The byte stored in the record.
    #[must_use]
    pub fn value(self) -> u8 {
        self.value
    }

    /// The category the byte belongs to.
    #[must_use]
    pub fn data_type(self) -> DataType {
        self.data_type
    }

    fn entry(self) -> Option<(&'static str, &'static str)> {
        let i = usize::from(self.value);
        match self.data_type {
            DataType::None => Some(("None", "undefined")),
            DataType::Character => CHARACTER.get(i).copied(),
            DataType::Bitmap => BITMAP.get(i).copied(),
            DataType::Vector => VECTOR.get(i).copied(),
            DataType::Audio => AUDIO.get(i).copied(),
            // FileType of binary text holds half the width, not a format.
            DataType::BinaryText => Some(("BIN", "Binary text or a .BIN file")),
            DataType::XBin => Some(("XBin", "Extended binary text or a XBin file")),
            DataType::Archive => ARCHIVE.get(i).copied(),
            DataType::Executable => Some(("EXE", "Executable program file")),
            DataType::Unknown(_) => None,
        }
    }

    /// Short format name such as "ANSi" or "S3M".
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().map_or("unknown", |(name, _)| name)
    }

    /// Longer format description such as "ANSI color text".
    #[must_use]
    pub fn description(self) -> &'static str {
        self.entry().map_or("unknown file type", |(_, description)| description)
    }

    /// A sentence about a character format, `None` for anything else.
    #[must_use]
    pub fn details(self) -> Option<&'static str> {
        match self.data_type {
            DataType::Character => CHARACTER_DETAILS.get(usize::from(self.value)).copied(),
            _ => None,
        }
    }

    /// What TInfo1, TInfo2 and TInfo3 mean for this format. Unused slots are empty.
    #[must_use]
    pub fn info_labels(self) -> [&'static str; 3] {
        const WIDTH: &str = "character width";
        const LINES: &str = "number of lines";
        const PIXEL_WIDTH: &str = "pixel width";
        match (self.data_type, self.value) {
            // ASCII, ANSi, ANSiMation, PCBoard, Avatar, TundraDraw
            (DataType::Character, 0..=2 | 4 | 5 | 8) | (DataType::XBin, _) => [WIDTH, LINES, ""],
            (DataType::Character, 3) => [PIXEL_WIDTH, "character screen height", "number of colors"],
            (DataType::Bitmap, 0..=13) => [PIXEL_WIDTH, "pixel height", "pixel depth"],
            (DataType::Audio, v) if SAMPLES.contains(&v) => ["sample rate", "", ""],
            _ => ["", "", ""],
        }
    }
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FileType", 3)?;
        s.serialize_field("type", &self.value)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("description", self.description())?;
        s.end()
    }
}

/// A TInfo value together with what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeInfo {
    /// Raw little-endian value.
    pub value: u16,
    /// Meaning of the value, empty when the format gives it none.
    pub info: &'static str,
}
