//! Encoding names, aliases and families.
//!
//! Legacy text arrives with a free-form encoding name: an IANA registry name
//! (`IBM437`), a WHATWG label (`x-mac-roman`) or a shorthand typed by a user
//! (`cp-437`, `oem-850`, `win1252`). [`resolve`] turns any of these into a
//! [`Charset`], and [`Charset::family`] groups charsets by the way their
//! control codes are pictured.

pub(crate) mod tables;

use std::fmt;

use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// A supported character encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Charset {
    #[default]
    Utf8,
    /// UTF-16 with byte order taken from a leading BOM, big-endian otherwise.
    Utf16,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
    Ibm037,
    Ibm437,
    Ibm850,
    Ibm852,
    Ibm855,
    Ibm858,
    Ibm860,
    Ibm862,
    Ibm863,
    Ibm865,
    Ibm866,
    Ibm1047,
    Ibm1140,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_6E,
    Iso8859_6I,
    Iso8859_7,
    Iso8859_8,
    Iso8859_8E,
    Iso8859_8I,
    Iso8859_9,
    Iso8859_10,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Koi8R,
    Koi8U,
    Macintosh,
    Windows874,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
    ShiftJis,
}

/// How a group of charsets pictures its control codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFamily {
    /// IBM mainframe code pages 037, 1047 and 1140.
    Ebcdic,
    /// IBM PC code page 437 and its OEM siblings.
    Dos,
    /// ISO-8859 parts and Windows-874.
    Latin,
    /// ISO-8859-6 and ISO-8859-8 with explicit or implicit directionality.
    LatinControls,
    /// KOI8-R and KOI8-U.
    Koi8,
    /// Mac OS Roman.
    Macintosh,
    /// Windows-1250 to Windows-1258.
    Windows,
    /// UTF-8, UTF-16 and UTF-32.
    Unicode,
    /// Anything else, currently Shift_JIS.
    Default,
}

impl Charset {
    /// Every supported charset, in a stable display order.
    #[must_use]
    #[allow(clippy::enum_glob_use)]
    pub fn all() -> &'static [Charset] {
        use Charset::*;
        &[
            Ibm037, Ibm437, Ibm850, Ibm852, Ibm855, Ibm858, Ibm860, Ibm862, Ibm863, Ibm865,
            Ibm866, Ibm1047, Ibm1140, Iso8859_1, Iso8859_2, Iso8859_3, Iso8859_4, Iso8859_5,
            Iso8859_6, Iso8859_6E, Iso8859_6I, Iso8859_7, Iso8859_8, Iso8859_8E, Iso8859_8I,
            Iso8859_9, Iso8859_10, Iso8859_13, Iso8859_14, Iso8859_15, Iso8859_16, Koi8R,
            Koi8U, Macintosh, Windows874, Windows1250, Windows1251, Windows1252, Windows1253,
            Windows1254, Windows1255, Windows1256, Windows1257, Windows1258, ShiftJis, Utf8,
            Utf16, Utf16Be, Utf16Le, Utf32Be, Utf32Le,
        ]
    }

    /// Canonical IANA name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Ibm037 => "IBM037",
            Self::Ibm437 => "IBM437",
            Self::Ibm850 => "IBM850",
            Self::Ibm852 => "IBM852",
            Self::Ibm855 => "IBM855",
            Self::Ibm858 => "IBM00858",
            Self::Ibm860 => "IBM860",
            Self::Ibm862 => "IBM862",
            Self::Ibm863 => "IBM863",
            Self::Ibm865 => "IBM865",
            Self::Ibm866 => "IBM866",
            Self::Ibm1047 => "IBM1047",
            Self::Ibm1140 => "IBM01140",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_2 => "ISO-8859-2",
            Self::Iso8859_3 => "ISO-8859-3",
            Self::Iso8859_4 => "ISO-8859-4",
            Self::Iso8859_5 => "ISO-8859-5",
            Self::Iso8859_6 => "ISO-8859-6",
            Self::Iso8859_6E => "ISO-8859-6-E",
            Self::Iso8859_6I => "ISO-8859-6-I",
            Self::Iso8859_7 => "ISO-8859-7",
            Self::Iso8859_8 => "ISO-8859-8",
            Self::Iso8859_8E => "ISO-8859-8-E",
            Self::Iso8859_8I => "ISO-8859-8-I",
            Self::Iso8859_9 => "ISO-8859-9",
            Self::Iso8859_10 => "ISO-8859-10",
            Self::Iso8859_13 => "ISO-8859-13",
            Self::Iso8859_14 => "ISO-8859-14",
            Self::Iso8859_15 => "ISO-8859-15",
            Self::Iso8859_16 => "ISO-8859-16",
            Self::Koi8R => "KOI8-R",
            Self::Koi8U => "KOI8-U",
            Self::Macintosh => "macintosh",
            Self::Windows874 => "windows-874",
            Self::Windows1250 => "windows-1250",
            Self::Windows1251 => "windows-1251",
            Self::Windows1252 => "windows-1252",
            Self::Windows1253 => "windows-1253",
            Self::Windows1254 => "windows-1254",
            Self::Windows1255 => "windows-1255",
            Self::Windows1256 => "windows-1256",
            Self::Windows1257 => "windows-1257",
            Self::Windows1258 => "windows-1258",
            Self::ShiftJis => "Shift_JIS",
        }
    }

    /// Registered IANA aliases, matched case-insensitively by [`resolve`].
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Utf8 => &["csUTF8"],
            Self::Utf16 => &["csUTF16"],
            Self::Utf16Be => &["csUTF16BE"],
            Self::Utf16Le => &["csUTF16LE"],
            Self::Utf32Be => &["csUTF32BE"],
            Self::Utf32Le => &["csUTF32LE"],
            Self::Ibm037 => &[
                "cp037",
                "ebcdic-cp-us",
                "ebcdic-cp-ca",
                "ebcdic-cp-wt",
                "ebcdic-cp-nl",
                "csIBM037",
            ],
            Self::Ibm437 => &["cp437", "437", "csPC8CodePage437"],
            Self::Ibm850 => &["cp850", "850", "csPC850Multilingual"],
            Self::Ibm852 => &["cp852", "852", "csPCp852"],
            Self::Ibm855 => &["cp855", "855", "csIBM855"],
            Self::Ibm858 => &["CCSID00858", "CP00858", "PC-Multilingual-850+euro", "csIBM00858"],
            Self::Ibm860 => &["cp860", "860", "csIBM860"],
            Self::Ibm862 => &["cp862", "862", "csPC862LatinHebrew"],
            Self::Ibm863 => &["cp863", "863", "csIBM863"],
            Self::Ibm865 => &["cp865", "865", "csIBM865"],
            Self::Ibm866 => &["cp866", "866", "csIBM866"],
            Self::Ibm1047 => &["IBM-1047", "csIBM1047"],
            Self::Ibm1140 => &["CCSID01140", "CP01140", "ebcdic-us-37+euro", "csIBM01140"],
            Self::Iso8859_1 => &[
                "iso-ir-100",
                "ISO_8859-1",
                "ISO_8859-1:1987",
                "latin1",
                "l1",
                "IBM819",
                "CP819",
                "csISOLatin1",
            ],
            Self::Iso8859_2 => &["iso-ir-101", "ISO_8859-2", "ISO_8859-2:1987", "latin2", "l2", "csISOLatin2"],
            Self::Iso8859_3 => &["iso-ir-109", "ISO_8859-3", "ISO_8859-3:1988", "latin3", "l3", "csISOLatin3"],
            Self::Iso8859_4 => &["iso-ir-110", "ISO_8859-4", "ISO_8859-4:1988", "latin4", "l4", "csISOLatin4"],
            Self::Iso8859_5 => &["iso-ir-144", "ISO_8859-5", "ISO_8859-5:1988", "cyrillic", "csISOLatinCyrillic"],
            Self::Iso8859_6 => &[
                "iso-ir-127",
                "ISO_8859-6",
                "ISO_8859-6:1987",
                "ECMA-114",
                "ASMO-708",
                "arabic",
                "csISOLatinArabic",
            ],
            Self::Iso8859_6E => &["ISO_8859-6-E", "csISO88596E"],
            Self::Iso8859_6I => &["ISO_8859-6-I", "csISO88596I"],
            Self::Iso8859_7 => &[
                "iso-ir-126",
                "ISO_8859-7",
                "ISO_8859-7:1987",
                "ELOT_928",
                "ECMA-118",
                "greek",
                "greek8",
                "csISOLatinGreek",
            ],
            Self::Iso8859_8 => &["iso-ir-138", "ISO_8859-8", "ISO_8859-8:1988", "hebrew", "csISOLatinHebrew"],
            Self::Iso8859_8E => &["ISO_8859-8-E", "csISO88598E"],
            Self::Iso8859_8I => &["ISO_8859-8-I", "csISO88598I"],
            Self::Iso8859_9 => &["iso-ir-148", "ISO_8859-9", "ISO_8859-9:1989", "latin5", "l5", "csISOLatin5"],
            Self::Iso8859_10 => &["iso-ir-157", "l6", "ISO_8859-10:1992", "csISOLatin6", "latin6"],
            Self::Iso8859_13 => &["csISO885913"],
            Self::Iso8859_14 => &[
                "iso-ir-199",
                "ISO_8859-14:1998",
                "ISO_8859-14",
                "latin8",
                "iso-celtic",
                "l8",
                "csISO885914",
            ],
            Self::Iso8859_15 => &["ISO_8859-15", "Latin-9", "csISO885915"],
            Self::Iso8859_16 => &["iso-ir-226", "ISO_8859-16:2001", "ISO_8859-16", "latin10", "l10", "csISO885916"],
            Self::Koi8R => &["csKOI8R"],
            Self::Koi8U => &["csKOI8U"],
            Self::Macintosh => &["mac", "csMacintosh"],
            Self::Windows874 => &["cswindows874"],
            Self::Windows1250 => &["cswindows1250"],
            Self::Windows1251 => &["cswindows1251"],
            Self::Windows1252 => &["cswindows1252"],
            Self::Windows1253 => &["cswindows1253"],
            Self::Windows1254 => &["cswindows1254"],
            Self::Windows1255 => &["cswindows1255"],
            Self::Windows1256 => &["cswindows1256"],
            Self::Windows1257 => &["cswindows1257"],
            Self::Windows1258 => &["cswindows1258"],
            Self::ShiftJis => &["MS_Kanji", "csShiftJIS"],
        }
    }

    /// Short human description of the charset.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Utf8 | Self::Utf16 | Self::Utf16Be | Self::Utf16Le | Self::Utf32Be | Self::Utf32Le => {
                "Unicode"
            }
            Self::Ibm037 => "US/Canada Latin 1",
            Self::Ibm437 => "DOS, OEM-US",
            Self::Ibm850 => "DOS, Latin 1",
            Self::Ibm852 => "DOS, Latin 2",
            Self::Ibm855 => "DOS, Cyrillic",
            Self::Ibm858 => "DOS, Western Europe",
            Self::Ibm860 => "DOS, Portuguese",
            Self::Ibm862 => "DOS, Hebrew",
            Self::Ibm863 => "DOS, French Canada",
            Self::Ibm865 => "DOS, Nordic",
            Self::Ibm866 => "DOS, Cyrillic Russian",
            Self::Ibm1047 => "C programming language",
            Self::Ibm1140 => "US/Canada Latin 1 plus €",
            Self::Iso8859_1 | Self::Windows1252 => "Western European",
            Self::Iso8859_2 | Self::Windows1250 => "Central European",
            Self::Iso8859_3 => "South European",
            Self::Iso8859_4 => "North European",
            Self::Iso8859_5 | Self::Windows1251 => "Cyrillic",
            Self::Iso8859_6 | Self::Iso8859_6E | Self::Iso8859_6I | Self::Windows1256 => "Arabic",
            Self::Iso8859_7 | Self::Windows1253 => "Greek",
            Self::Iso8859_8 | Self::Iso8859_8E | Self::Iso8859_8I | Self::Windows1255 => "Hebrew",
            Self::Iso8859_9 | Self::Windows1254 => "Turkish",
            Self::Iso8859_10 => "Nordic",
            Self::Iso8859_13 | Self::Windows1257 => "Baltic Rim",
            Self::Iso8859_14 => "Celtic",
            Self::Iso8859_15 => "Western European, 1999",
            Self::Iso8859_16 => "South-Eastern European",
            Self::Koi8R => "KOI8-R Russian",
            Self::Koi8U => "KOI8-U Ukrainian",
            Self::Macintosh => "Mac OS Roman",
            Self::Windows874 => "Thai",
            Self::Windows1258 => "Vietnamese",
            Self::ShiftJis => "Japanese",
        }
    }

    /// The substitution family of this charset.
    #[must_use]
    pub fn family(self) -> EncodingFamily {
        match self {
            Self::Ibm037 | Self::Ibm1047 | Self::Ibm1140 => EncodingFamily::Ebcdic,
            Self::Ibm437
            | Self::Ibm850
            | Self::Ibm852
            | Self::Ibm855
            | Self::Ibm858
            | Self::Ibm860
            | Self::Ibm862
            | Self::Ibm863
            | Self::Ibm865
            | Self::Ibm866 => EncodingFamily::Dos,
            Self::Iso8859_6E | Self::Iso8859_6I | Self::Iso8859_8E | Self::Iso8859_8I => {
                EncodingFamily::LatinControls
            }
            Self::Iso8859_1
            | Self::Iso8859_2
            | Self::Iso8859_3
            | Self::Iso8859_4
            | Self::Iso8859_5
            | Self::Iso8859_6
            | Self::Iso8859_7
            | Self::Iso8859_8
            | Self::Iso8859_9
            | Self::Iso8859_10
            | Self::Iso8859_13
            | Self::Iso8859_14
            | Self::Iso8859_15
            | Self::Iso8859_16
            | Self::Windows874 => EncodingFamily::Latin,
            Self::Koi8R | Self::Koi8U => EncodingFamily::Koi8,
            Self::Macintosh => EncodingFamily::Macintosh,
            Self::Windows1250
            | Self::Windows1251
            | Self::Windows1252
            | Self::Windows1253
            | Self::Windows1254
            | Self::Windows1255
            | Self::Windows1256
            | Self::Windows1257
            | Self::Windows1258 => EncodingFamily::Windows,
            Self::Utf8 | Self::Utf16 | Self::Utf16Be | Self::Utf16Le | Self::Utf32Be | Self::Utf32Le => {
                EncodingFamily::Unicode
            }
            Self::ShiftJis => EncodingFamily::Default,
        }
    }

    /// Whether this is an IBM mainframe code page.
    #[must_use]
    pub fn is_ebcdic(self) -> bool {
        self.family() == EncodingFamily::Ebcdic
    }

    /// Whether every byte decodes to exactly one character.
    #[must_use]
    pub fn is_single_byte(self) -> bool {
        !matches!(self.family(), EncodingFamily::Unicode | EncodingFamily::Default)
    }

    /// Match a WHATWG encoding back to a charset.
    fn from_whatwg(encoding: &'static Encoding) -> Option<Self> {
        use encoding_rs as e;
        let pairs: [(&'static Encoding, Charset); 31] = [
            (e::UTF_8, Self::Utf8),
            (e::UTF_16BE, Self::Utf16Be),
            (e::UTF_16LE, Self::Utf16Le),
            (e::IBM866, Self::Ibm866),
            (e::ISO_8859_2, Self::Iso8859_2),
            (e::ISO_8859_3, Self::Iso8859_3),
            (e::ISO_8859_4, Self::Iso8859_4),
            (e::ISO_8859_5, Self::Iso8859_5),
            (e::ISO_8859_6, Self::Iso8859_6),
            (e::ISO_8859_7, Self::Iso8859_7),
            (e::ISO_8859_8, Self::Iso8859_8),
            (e::ISO_8859_8_I, Self::Iso8859_8I),
            (e::ISO_8859_10, Self::Iso8859_10),
            (e::ISO_8859_13, Self::Iso8859_13),
            (e::ISO_8859_14, Self::Iso8859_14),
            (e::ISO_8859_15, Self::Iso8859_15),
            (e::ISO_8859_16, Self::Iso8859_16),
            (e::KOI8_R, Self::Koi8R),
            (e::KOI8_U, Self::Koi8U),
            (e::MACINTOSH, Self::Macintosh),
            (e::WINDOWS_874, Self::Windows874),
            (e::WINDOWS_1250, Self::Windows1250),
            (e::WINDOWS_1251, Self::Windows1251),
            (e::WINDOWS_1252, Self::Windows1252),
            (e::WINDOWS_1253, Self::Windows1253),
            (e::WINDOWS_1254, Self::Windows1254),
            (e::WINDOWS_1255, Self::Windows1255),
            (e::WINDOWS_1256, Self::Windows1256),
            (e::WINDOWS_1257, Self::Windows1257),
            (e::WINDOWS_1258, Self::Windows1258),
            (e::SHIFT_JIS, Self::ShiftJis),
        ];
        pairs
            .iter()
            .find(|(candidate, _)| *candidate == encoding)
            .map(|&(_, charset)| charset)
    }

    /// Case-insensitive match against canonical names and IANA aliases.
    fn from_registry(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|charset| {
            charset.name().eq_ignore_ascii_case(name)
                || charset.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a free-form encoding name.
///
/// Lookup order:
/// 1. canonical names and IANA aliases, case-insensitive
/// 2. WHATWG labels through `encoding_rs`
/// 3. the [`shorten`]ed name run through [`alias`], then retried against (1)
///
/// An empty name resolves to UTF-8.
///
/// # Errors
///
/// Returns [`Error::UnresolvedEncoding`] carrying both the supplied name and
/// the normalized name that was retried.
///
/// # Examples
///
/// ```
/// use retrotext::encoding::{resolve, Charset};
///
/// assert_eq!(resolve("CP-437").unwrap(), Charset::Ibm437);
/// assert_eq!(resolve("latin1").unwrap(), Charset::Iso8859_1);
/// assert_eq!(resolve("x-mac-roman").unwrap(), Charset::Macintosh);
/// assert!(resolve("cp9999").is_err());
/// ```
pub fn resolve(name: &str) -> Result<Charset> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Ok(Charset::Utf8);
    }
    if let Some(charset) = Charset::from_registry(trimmed) {
        tracing::trace!(name, %charset, "resolved by registry name");
        return Ok(charset);
    }
    if let Some(charset) = Encoding::for_label(trimmed.as_bytes()).and_then(Charset::from_whatwg) {
        tracing::trace!(name, %charset, "resolved by WHATWG label");
        return Ok(charset);
    }
    let short = shorten(trimmed);
    let normalized = alias(&short).map_or(short, str::to_string);
    match Charset::from_registry(&normalized) {
        Some(charset) => {
            tracing::trace!(name, %normalized, %charset, "resolved by alias");
            Ok(charset)
        }
        None => Err(Error::UnresolvedEncoding {
            name: name.to_string(),
            normalized,
        }),
    }
}

/// Lowercase a name and strip the first matching common prefix.
///
/// ```
/// use retrotext::encoding::shorten;
///
/// assert_eq!(shorten("CP-437"), "437");
/// assert_eq!(shorten("IBM Code Page 437"), "ibm437");
/// assert_eq!(shorten("iso8859-2"), "iso-8859-2");
/// ```
#[must_use]
pub fn shorten(name: &str) -> String {
    let n = name.to_lowercase();
    if n == "windows code page 858" {
        return "ibm00858".to_string();
    }
    if let Some(rest) = n.strip_prefix("iso8859") {
        let rest = rest.trim_start_matches(['-', '_']);
        if !rest.is_empty() {
            return format!("iso-8859-{rest}");
        }
    }
    // Longer prefixes first where one is a prefix of another.
    const STRIP: [(&str, &str); 10] = [
        ("cp-", ""),
        ("cp", ""),
        ("ibm code page ", "ibm"),
        ("ibm-", ""),
        ("ibm", ""),
        ("oem-", ""),
        ("windows-", ""),
        ("windows", ""),
        ("win", ""),
        ("iso 8859-", "iso-8859-"),
    ];
    for (prefix, replacement) in STRIP {
        if let Some(rest) = n.strip_prefix(prefix) {
            if !rest.is_empty() {
                return format!("{replacement}{rest}");
            }
        }
    }
    n
}

/// Map a shortened name or common nickname to a canonical name.
#[must_use]
pub fn alias(short: &str) -> Option<&'static str> {
    let canonical = match short {
        "37" | "037" => "IBM037",
        "437" | "dos" | "ibmpc" | "msdos" | "us" | "pc-8" | "latin-us" => "IBM437",
        "850" | "latini" => "IBM850",
        "852" | "latinii" => "IBM852",
        "855" => "IBM855",
        "858" => "IBM00858",
        "860" => "IBM860",
        "862" => "IBM862",
        "863" => "IBM863",
        "865" => "IBM865",
        "866" => "IBM866",
        "1047" => "IBM1047",
        "1140" | "ibm1140" => "IBM01140",
        "1" | "819" | "28591" => "ISO-8859-1",
        "2" | "1111" | "28592" => "ISO-8859-2",
        "3" | "913" | "28593" => "ISO-8859-3",
        "4" | "914" | "28594" => "ISO-8859-4",
        "5" | "1124" | "28595" => "ISO-8859-5",
        "6" | "1089" | "28596" => "ISO-8859-6",
        "7" | "813" | "28597" => "ISO-8859-7",
        "8" | "916" | "1125" | "28598" => "ISO-8859-8",
        "9" | "920" | "28599" => "ISO-8859-9",
        "10" | "919" | "28600" => "ISO-8859-10",
        "11" | "874" | "iso-8859-11" => "windows-874",
        "13" | "921" | "28603" => "ISO-8859-13",
        "14" | "28604" => "ISO-8859-14",
        "15" | "923" | "28605" => "ISO-8859-15",
        "16" | "28606" => "ISO-8859-16",
        "878" | "20866" | "koi8r" => "KOI8-R",
        "1168" | "21866" | "koi8u" => "KOI8-U",
        "10000" | "macroman" | "mac-roman" | "mac os roman" | "mac" => "macintosh",
        "1250" => "windows-1250",
        "1251" => "windows-1251",
        "1252" | "1004" | "win" | "windows" => "windows-1252",
        "1253" => "windows-1253",
        "1254" => "windows-1254",
        "1255" => "windows-1255",
        "1256" => "windows-1256",
        "1257" => "windows-1257",
        "1258" => "windows-1258",
        "shift jis" | "shiftjis" => "Shift_JIS",
        _ => return None,
    };
    Some(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_utf8() {
        assert_eq!(resolve("").unwrap(), Charset::Utf8);
        assert_eq!(resolve("   ").unwrap(), Charset::Utf8);
    }

    #[test]
    fn registry_names_win_over_whatwg_labels() {
        // WHATWG folds latin1 into windows-1252.
        assert_eq!(resolve("latin1").unwrap(), Charset::Iso8859_1);
        assert_eq!(resolve("ISO-8859-9").unwrap(), Charset::Iso8859_9);
        assert_eq!(resolve("ISO_8859-1:1987").unwrap(), Charset::Iso8859_1);
    }

    #[test]
    fn whatwg_labels() {
        assert_eq!(resolve("unicode-1-1-utf-8").unwrap(), Charset::Utf8);
        assert_eq!(resolve("x-mac-roman").unwrap(), Charset::Macintosh);
        assert_eq!(resolve("sjis").unwrap(), Charset::ShiftJis);
        assert_eq!(resolve("dos-874").unwrap(), Charset::Windows874);
        assert_eq!(resolve("koi8-ru").unwrap(), Charset::Koi8U);
    }

    #[test]
    fn whatwg_encodings_without_a_charset_are_unresolved() {
        assert!(resolve("gbk").is_err());
        assert!(resolve("big5").is_err());
    }

    #[test]
    fn shorten_prefixes() {
        assert_eq!(shorten("cp437"), "437");
        assert_eq!(shorten("IBM-37"), "37");
        assert_eq!(shorten("oem-850"), "850");
        assert_eq!(shorten("Windows-1252"), "1252");
        assert_eq!(shorten("win1252"), "1252");
        assert_eq!(shorten("iso88592"), "iso-8859-2");
        assert_eq!(shorten("windows1252"), "1252");
        assert_eq!(shorten("ISO 8859-15"), "iso-8859-15");
        assert_eq!(shorten("Windows Code Page 858"), "ibm00858");
        assert_eq!(shorten("cp"), "cp");
    }

    #[test]
    fn alias_table() {
        assert_eq!(alias("dos"), Some("IBM437"));
        assert_eq!(alias("11"), Some("windows-874"));
        assert_eq!(alias("mac os roman"), Some("macintosh"));
        assert_eq!(alias("nope"), None);
        assert_eq!(resolve("win").unwrap(), Charset::Windows1252);
        assert_eq!(resolve("win1251").unwrap(), Charset::Windows1251);
    }

    #[test]
    fn unresolved_name_carries_normalized_form() {
        match resolve("CP-9999") {
            Err(Error::UnresolvedEncoding { name, normalized }) => {
                assert_eq!(name, "CP-9999");
                assert_eq!(normalized, "9999");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn families() {
        assert_eq!(Charset::Ibm1140.family(), EncodingFamily::Ebcdic);
        assert_eq!(Charset::Ibm866.family(), EncodingFamily::Dos);
        assert_eq!(Charset::Windows874.family(), EncodingFamily::Latin);
        assert_eq!(Charset::Iso8859_8I.family(), EncodingFamily::LatinControls);
        assert_eq!(Charset::ShiftJis.family(), EncodingFamily::Default);
        assert!(Charset::Ibm037.is_ebcdic());
        assert!(!Charset::Utf16Le.is_single_byte());
    }

    #[test]
    fn every_canonical_name_resolves_to_itself() {
        for &charset in Charset::all() {
            assert_eq!(resolve(charset.name()).unwrap(), charset, "{charset}");
        }
    }

    #[test]
    fn every_alias_resolves() {
        for &charset in Charset::all() {
            for alias in charset.aliases() {
                assert_eq!(resolve(alias).unwrap(), charset, "{alias}");
            }
        }
    }
}
