//! SAUCE metadata.
//!
//! The Standard Architecture for Universal Comment Extensions appends a
//! 128 byte record, and optionally a block of 64 byte comment lines, to
//! the end of a file. The record starts with `SAUCE00`; the comment block
//! starts with `COMNT` and sits immediately before the record.
//!
//! ```text
//! offset  size  field
//!      0     5  ID "SAUCE"
//!      5     2  Version "00"
//!      7    35  Title
//!     42    20  Author
//!     62    20  Group
//!     82     8  Date CCYYMMDD
//!     90     4  FileSize, little-endian
//!     94     1  DataType
//!     95     1  FileType
//!     96     8  TInfo1..TInfo4, little-endian
//!    104     1  Comments, number of comment lines
//!    105     1  Flags
//!    106    22  TInfoS, NUL padded font name
//! ```
//!
//! Text fields are code page 437.

mod flags;
mod types;

pub use flags::{AnsiFlags, AspectRatio, LetterSpacing};
pub use types::{DataType, FileType, TypeInfo};

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::encoding::tables;

/// Size of the record, tag included.
pub const RECORD_SIZE: usize = 128;

/// The record is looked for in this many bytes at the end of a file.
const SCAN_LIMIT: usize = 512;

const SAUCE_ID: &[u8] = b"SAUCE00";
const COMNT_ID: &[u8] = b"COMNT";
const COMNT_LINE_SIZE: usize = 64;

/// Find the start of the SAUCE record.
///
/// Searches backwards through the last 512 bytes. A tag with fewer than
/// 128 bytes after it is not a record.
///
/// ```
/// use retrotext::sauce::scan;
///
/// let mut file = b"art".to_vec();
/// file.extend_from_slice(b"SAUCE00");
/// file.resize(3 + 128, b' ');
/// assert_eq!(scan(&file), Some(3));
/// assert_eq!(scan(&file[..100]), None);
/// ```
#[must_use]
pub fn scan(data: &[u8]) -> Option<usize> {
    let last = data.len().checked_sub(RECORD_SIZE)?;
    let first = data.len().saturating_sub(SCAN_LIMIT);
    (first..=last).rev().find(|&i| data[i..].starts_with(SAUCE_ID))
}

/// Parse the SAUCE record and its comments, `None` when the file has no record.
#[must_use]
pub fn parse(data: &[u8]) -> Option<Record> {
    let Some(start) = scan(data) else {
        tracing::trace!(len = data.len(), "no sauce record");
        return None;
    };
    let r = &data[start..start + RECORD_SIZE];
    let data_type = DataType::from_sauce(r[94]);
    let file_type = FileType::new(data_type, r[95]);
    let [label1, label2, label3] = file_type.info_labels();
    let record = Record {
        id: cp437(&r[0..5]),
        version: cp437(&r[5..7]),
        title: text_field(&r[7..42]),
        author: text_field(&r[42..62]),
        group: text_field(&r[62..82]),
        date: Date::parse(&r[82..90]),
        file_size: Sizes::new(u32::from_le_bytes([r[90], r[91], r[92], r[93]])),
        data_type,
        file_type,
        info: TypeInfos {
            info1: TypeInfo { value: le16(r, 96), info: label1 },
            info2: TypeInfo { value: le16(r, 98), info: label2 },
            info3: TypeInfo { value: le16(r, 100), info: label3 },
            info4: le16(r, 102),
            flags: AnsiFlags::from_sauce(r[105]),
            font: cp437(&r[106..128]).replace('\0', ""),
        },
        comments: Comments::find(data, start, r[104]),
    };
    tracing::debug!(
        index = start,
        title = %record.title,
        file_type = record.file_type.name(),
        comments = record.comments.lines.len(),
        "sauce record found"
    );
    Some(record)
}

fn le16(r: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([r[at], r[at + 1]])
}

/// Some writers pad with NUL rather than spaces.
fn text_field(bytes: &[u8]) -> String {
    cp437(bytes)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

fn cp437(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b < 0x80 { char::from(b) } else { tables::CP437[usize::from(b - 0x80)] })
        .collect()
}

/// A parsed SAUCE record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Always "SAUCE".
    pub id: String,
    /// Always "00".
    pub version: String,
    /// Title of the work, trimmed of spaces and NULs.
    pub title: String,
    /// Handle or name of the author, trimmed of spaces and NULs.
    pub author: String,
    /// Group or company, trimmed of spaces and NULs.
    pub group: String,
    /// Creation date.
    pub date: Date,
    /// Size of the file without the SAUCE data.
    #[serde(rename = "filesize")]
    pub file_size: Sizes,
    /// Category of the file.
    pub data_type: DataType,
    /// Format within the category.
    pub file_type: FileType,
    /// TInfo fields, flags and font.
    #[serde(rename = "typeInfo")]
    pub info: TypeInfos,
    /// Comment block.
    pub comments: Comments,
}

impl Record {
    /// A sentence about the format, for character files only.
    ///
    /// ```
    /// use retrotext::sauce::{DataType, FileType};
    ///
    /// let ansi = FileType::new(DataType::Character, 1);
    /// assert_eq!(ansi.details(), Some("ANSI text file with coloring codes and cursor positioning."));
    /// ```
    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        self.file_type.details()
    }
}

/// The TInfo fields and what they hold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeInfos {
    #[serde(rename = "1")]
    pub info1: TypeInfo,
    #[serde(rename = "2")]
    pub info2: TypeInfo,
    #[serde(rename = "3")]
    pub info3: TypeInfo,
    /// Unused by every format, kept raw.
    #[serde(rename = "4")]
    pub info4: u16,
    /// Interpreted Flags byte.
    pub flags: AnsiFlags,
    /// Font name from TInfoS, NUL-trimmed.
    #[serde(rename = "fontName")]
    pub font: String,
}

/// Which part of a date failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateError {
    #[error("year is not a number")]
    Year,
    #[error("month is not between 01 and 12")]
    Month,
    #[error("day is not between 01 and 31")]
    Day,
    #[error("date does not exist in the calendar")]
    Calendar,
}

/// The CCYYMMDD date of a record.
///
/// A malformed date never stops the record from parsing; the reason is
/// kept in [`Date::error`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Date {
    /// The eight characters as stored.
    pub value: String,
    /// The date, when valid.
    pub date: Option<NaiveDate>,
    /// Why the date is invalid.
    pub error: Option<DateError>,
}

impl Date {
    /// Parse an eight byte CCYYMMDD field.
    ///
    /// ```
    /// use retrotext::sauce::{Date, DateError};
    ///
    /// let date = Date::parse(b"20161126");
    /// assert_eq!(date.date.map(|d| d.to_string()), Some("2016-11-26".to_string()));
    /// assert_eq!(Date::parse(b"2016  26").error, Some(DateError::Month));
    /// ```
    #[must_use]
    pub fn parse(field: &[u8]) -> Self {
        let value = cp437(field);
        match Self::ymd(field) {
            Ok(date) => Self {
                value,
                date: Some(date),
                error: None,
            },
            Err(error) => {
                tracing::debug!(value = %value, %error, "sauce date");
                Self {
                    value,
                    date: None,
                    error: Some(error),
                }
            }
        }
    }

    fn ymd(field: &[u8]) -> std::result::Result<NaiveDate, DateError> {
        fn number(digits: Option<&[u8]>) -> Option<u32> {
            let digits = digits?;
            if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
                return None;
            }
            Some(digits.iter().fold(0, |n, d| n * 10 + u32::from(d - b'0')))
        }
        let year = number(field.get(0..4)).ok_or(DateError::Year)?;
        let month = number(field.get(4..6))
            .filter(|m| (1..=12).contains(m))
            .ok_or(DateError::Month)?;
        let day = number(field.get(6..8))
            .filter(|d| (1..=31).contains(d))
            .ok_or(DateError::Day)?;
        let year = i32::try_from(year).map_err(|_| DateError::Year)?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::Calendar)
    }

    /// Seconds since the Unix epoch at midnight UTC.
    #[must_use]
    pub fn epoch(&self) -> Option<i64> {
        self.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Date", 4)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("iso", &self.date)?;
        s.serialize_field("epoch", &self.epoch())?;
        s.serialize_field("error", &self.error)?;
        s.end()
    }
}

/// File size in bytes and in human units.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sizes {
    pub bytes: u32,
    /// Powers of 1000, "1.5 kB".
    pub decimal: String,
    /// Powers of 1024, "1.5 KiB".
    pub binary: String,
}

impl Sizes {
    /// Humanize a byte count.
    ///
    /// ```
    /// use retrotext::sauce::Sizes;
    ///
    /// let size = Sizes::new(1536);
    /// assert_eq!(size.decimal, "1.5 kB");
    /// assert_eq!(size.binary, "1.5 KiB");
    /// ```
    #[must_use]
    pub fn new(bytes: u32) -> Self {
        Self {
            bytes,
            decimal: humanize(bytes, 1000.0, ["kB", "MB", "GB"]),
            binary: humanize(bytes, 1024.0, ["KiB", "MiB", "GiB"]),
        }
    }
}

/// One decimal place for the first multiple, two for the rest.
fn humanize(bytes: u32, base: f64, units: [&str; 3]) -> String {
    if bytes == 0 {
        return "0".to_string();
    }
    let value = f64::from(bytes);
    if value < base {
        return format!("{bytes}B");
    }
    let mut scaled = value / base;
    for (i, unit) in units.iter().enumerate() {
        if scaled < base || i == units.len() - 1 {
            return if i == 0 {
                format!("{scaled:.1} {unit}")
            } else {
                format!("{scaled:.2} {unit}")
            };
        }
        scaled /= base;
    }
    format!("{bytes}B")
}

/// The optional comment block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Comments {
    /// Always "COMNT".
    pub id: String,
    /// Number of lines the record announces.
    pub count: u8,
    /// Right-trimmed comment lines.
    pub lines: Vec<String>,
}

impl Comments {
    /// Read the block that ends where the record at `sauce` starts.
    ///
    /// Only the `count` × 64 bytes before the record (plus the marker) are
    /// searched. Blocks that contain a newline are split on newlines;
    /// otherwise every 64 bytes is a line.
    fn find(data: &[u8], sauce: usize, count: u8) -> Self {
        let mut comments = Self {
            id: String::from_utf8_lossy(COMNT_ID).into_owned(),
            count,
            lines: Vec::new(),
        };
        if count == 0 {
            return comments;
        }
        let floor = sauce.saturating_sub(usize::from(count) * COMNT_LINE_SIZE + COMNT_ID.len());
        let Some(marker) = (floor..=sauce.saturating_sub(COMNT_ID.len()))
            .rev()
            .find(|&i| data[i..sauce].starts_with(COMNT_ID))
        else {
            tracing::debug!(count, "sauce comment block missing");
            return comments;
        };
        let block = &data[marker + COMNT_ID.len()..sauce];
        comments.lines = if block.contains(&b'\n') {
            let mut lines: Vec<&[u8]> = block.split(|&b| b == b'\n').collect();
            if lines.last().is_some_and(|l| l.is_empty()) {
                lines.pop();
            }
            lines.into_iter().map(|l| l.strip_suffix(b"\r").unwrap_or(l)).map(comment_line).collect()
        } else {
            block.chunks_exact(COMNT_LINE_SIZE).map(comment_line).collect()
        };
        comments
    }
}

fn comment_line(bytes: &[u8]) -> String {
    cp437(bytes).trim_end_matches([' ', '\0']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(text: &str, size: usize) -> Vec<u8> {
        let mut bytes = text.as_bytes().to_vec();
        bytes.resize(size, b' ');
        bytes
    }

    fn record(title: &str, date: &str, data_type: u8, file_type: u8, comments: u8) -> Vec<u8> {
        let mut r = b"SAUCE00".to_vec();
        r.extend(field(title, 35));
        r.extend(field("BG", 20));
        r.extend(field("Blocktronics", 20));
        r.extend(field(date, 8));
        r.extend(1234u32.to_le_bytes());
        r.push(data_type);
        r.push(file_type);
        r.extend(80u16.to_le_bytes());
        r.extend(25u16.to_le_bytes());
        r.extend(16u16.to_le_bytes());
        r.extend(0u16.to_le_bytes());
        r.push(comments);
        r.push(0b0001_0011);
        let mut font = b"IBM VGA".to_vec();
        font.resize(22, 0);
        r.extend(font);
        assert_eq!(r.len(), RECORD_SIZE);
        r
    }

    #[test]
    fn scan_needs_a_full_record() {
        assert_eq!(scan(b""), None);
        assert_eq!(scan(b"SAUCE00"), None);
        let r = record("T", "20200101", 1, 1, 0);
        assert_eq!(scan(&r), Some(0));
        assert_eq!(scan(&r[..127]), None);
    }

    #[test]
    fn scan_only_looks_at_the_tail() {
        let mut file = record("T", "20200101", 1, 1, 0);
        file.extend(vec![b'x'; 600]);
        assert_eq!(scan(&file), None);
    }

    #[test]
    fn scan_prefers_the_last_tag() {
        let mut file = b"SAUCE00 quoted in the text ".to_vec();
        let at = file.len();
        file.extend(record("T", "20200101", 1, 1, 0));
        assert_eq!(scan(&file), Some(at));
    }

    #[test]
    fn parse_fields() {
        let mut file = b"\x1b[0mart\x1a".to_vec();
        file.extend(record("TEST", "20161126", 1, 1, 0));
        let r = parse(&file).unwrap();
        assert_eq!(r.id, "SAUCE");
        assert_eq!(r.version, "00");
        assert_eq!(r.title, "TEST");
        assert_eq!(r.author, "BG");
        assert_eq!(r.group, "Blocktronics");
        assert_eq!(r.date.date, NaiveDate::from_ymd_opt(2016, 11, 26));
        assert_eq!(r.date.epoch(), Some(1_480_118_400));
        assert_eq!(r.file_size.bytes, 1234);
        assert_eq!(r.file_size.decimal, "1.2 kB");
        assert_eq!(r.data_type, DataType::Character);
        assert_eq!(r.file_type.name(), "ANSi");
        assert_eq!(r.info.info1, TypeInfo { value: 80, info: "character width" });
        assert_eq!(r.info.info2, TypeInfo { value: 25, info: "number of lines" });
        assert_eq!(r.info.info3.info, "");
        assert_eq!(r.info.font, "IBM VGA");
        assert!(r.info.flags.non_blink);
        assert_eq!(r.info.flags.letter_spacing, LetterSpacing::EightPixel);
        assert_eq!(r.description(), Some("ANSI text file with coloring codes and cursor positioning."));
        assert!(r.comments.lines.is_empty());
    }

    #[test]
    fn malformed_date_keeps_the_record() {
        let r = parse(&record("T", "2016AB26", 1, 0, 0)).unwrap();
        assert_eq!(r.title, "T");
        assert_eq!(r.date.value, "2016AB26");
        assert_eq!(r.date.date, None);
        assert_eq!(r.date.error, Some(DateError::Month));
        assert_eq!(r.date.epoch(), None);
    }

    #[test]
    fn date_errors_per_field() {
        assert_eq!(Date::parse(b"YYYY0101").error, Some(DateError::Year));
        assert_eq!(Date::parse(b"20011301").error, Some(DateError::Month));
        assert_eq!(Date::parse(b"200101  ").error, Some(DateError::Day));
        assert_eq!(Date::parse(b"20010230").error, Some(DateError::Calendar));
        assert_eq!(Date::parse(b"19960229").error, None);
    }

    #[test]
    fn comments_by_line_size() {
        let mut file = b"art".to_vec();
        file.extend(b"COMNT");
        file.extend(field("first line", 64));
        file.extend(field("second line", 64));
        file.extend(record("T", "20200101", 1, 1, 2));
        let r = parse(&file).unwrap();
        assert_eq!(r.comments.id, "COMNT");
        assert_eq!(r.comments.count, 2);
        assert_eq!(r.comments.lines, vec!["first line", "second line"]);
    }

    #[test]
    fn comments_by_newline() {
        let mut file = b"art".to_vec();
        file.extend(b"COMNT");
        file.extend(b"one\r\ntwo  \nthree\n");
        file.extend(record("T", "20200101", 1, 1, 1));
        let r = parse(&file).unwrap();
        assert_eq!(r.comments.lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn comments_missing_marker() {
        let mut file = vec![b' '; 64];
        file.extend(record("T", "20200101", 1, 1, 1));
        let r = parse(&file).unwrap();
        assert_eq!(r.comments.count, 1);
        assert!(r.comments.lines.is_empty());
    }

    #[test]
    fn high_bytes_are_code_page_437() {
        let mut raw = record("", "20200101", 1, 1, 0);
        raw[7] = 0x82;
        raw[42] = 0xDB;
        let r = parse(&raw).unwrap();
        assert_eq!(r.title, "é");
        assert_eq!(r.author, "█G");
    }

    #[test]
    fn humanized_sizes() {
        assert_eq!(Sizes::new(0).decimal, "0");
        assert_eq!(Sizes::new(999).decimal, "999B");
        assert_eq!(Sizes::new(1000).decimal, "1.0 kB");
        assert_eq!(Sizes::new(1000).binary, "1000B");
        assert_eq!(Sizes::new(1_500_000).decimal, "1.50 MB");
        assert_eq!(Sizes::new(3 * 1024 * 1024).binary, "3.00 MiB");
        assert_eq!(Sizes::new(u32::MAX).decimal, "4.29 GB");
    }

    #[test]
    fn record_serializes_to_json() {
        let r = parse(&record("TEST", "20161126", 1, 1, 0)).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["title"], "TEST");
        assert_eq!(json["date"]["iso"], "2016-11-26");
        assert_eq!(json["filesize"]["bytes"], 1234);
        assert_eq!(json["dataType"]["type"], 1);
        assert_eq!(json["fileType"]["name"], "ANSi");
        assert_eq!(json["typeInfo"]["1"]["info"], "character width");
        assert_eq!(json["typeInfo"]["fontName"], "IBM VGA");
        assert_eq!(json["comments"]["id"], "COMNT");
    }
}
