//! Byte to code point decoding, and the reverse encoder.
//!
//! Encodings in the WHATWG set go through `encoding_rs`; the IBM code pages
//! and the two ISO-8859 parts that WHATWG folds away use the lookup tables in
//! [`crate::encoding::tables`]. Single-byte decoding is total: every byte
//! yields exactly one `char`.

use encoding_rs::Encoding;

use crate::encoding::tables;
use crate::encoding::{Charset, EncodingFamily};
use crate::error::{Error, Result};

/// Where the bytes of a charset are decoded.
#[derive(Clone, Copy)]
enum Backend {
    Utf8,
    Utf16 { big_endian: bool, sniff_bom: bool },
    Utf32 { big_endian: bool },
    Whatwg(&'static Encoding),
    /// ASCII lower half plus a 128 entry upper half.
    Oem(&'static [char; 128]),
    Ebcdic(&'static [char; 256]),
    Byte(fn(u8) -> char),
}

impl Backend {
    fn of(charset: Charset) -> Self {
        use encoding_rs as e;
        match charset {
            Charset::Utf8 => Self::Utf8,
            Charset::Utf16 => Self::Utf16 { big_endian: true, sniff_bom: true },
            Charset::Utf16Be => Self::Utf16 { big_endian: true, sniff_bom: false },
            Charset::Utf16Le => Self::Utf16 { big_endian: false, sniff_bom: false },
            Charset::Utf32Be => Self::Utf32 { big_endian: true },
            Charset::Utf32Le => Self::Utf32 { big_endian: false },
            Charset::Ibm037 => Self::Ebcdic(&tables::CP037),
            Charset::Ibm1047 => Self::Ebcdic(&tables::CP1047),
            Charset::Ibm1140 => Self::Ebcdic(&tables::CP1140),
            Charset::Ibm437 => Self::Oem(&tables::CP437),
            Charset::Ibm850 => Self::Oem(&tables::CP850),
            Charset::Ibm852 => Self::Oem(&tables::CP852),
            Charset::Ibm855 => Self::Oem(&tables::CP855),
            Charset::Ibm858 => Self::Oem(&tables::CP858),
            Charset::Ibm860 => Self::Oem(&tables::CP860),
            Charset::Ibm862 => Self::Oem(&tables::CP862),
            Charset::Ibm863 => Self::Oem(&tables::CP863),
            Charset::Ibm865 => Self::Oem(&tables::CP865),
            Charset::Ibm866 => Self::Whatwg(e::IBM866),
            Charset::Iso8859_1 => Self::Byte(tables::iso_8859_1),
            Charset::Iso8859_9 => Self::Byte(tables::iso_8859_9),
            Charset::Iso8859_2 => Self::Whatwg(e::ISO_8859_2),
            Charset::Iso8859_3 => Self::Whatwg(e::ISO_8859_3),
            Charset::Iso8859_4 => Self::Whatwg(e::ISO_8859_4),
            Charset::Iso8859_5 => Self::Whatwg(e::ISO_8859_5),
            Charset::Iso8859_6 | Charset::Iso8859_6E | Charset::Iso8859_6I => {
                Self::Whatwg(e::ISO_8859_6)
            }
            Charset::Iso8859_7 => Self::Whatwg(e::ISO_8859_7),
            Charset::Iso8859_8 | Charset::Iso8859_8E => Self::Whatwg(e::ISO_8859_8),
            Charset::Iso8859_8I => Self::Whatwg(e::ISO_8859_8_I),
            Charset::Iso8859_10 => Self::Whatwg(e::ISO_8859_10),
            Charset::Iso8859_13 => Self::Whatwg(e::ISO_8859_13),
            Charset::Iso8859_14 => Self::Whatwg(e::ISO_8859_14),
            Charset::Iso8859_15 => Self::Whatwg(e::ISO_8859_15),
            Charset::Iso8859_16 => Self::Whatwg(e::ISO_8859_16),
            Charset::Koi8R => Self::Whatwg(e::KOI8_R),
            Charset::Koi8U => Self::Whatwg(e::KOI8_U),
            Charset::Macintosh => Self::Whatwg(e::MACINTOSH),
            Charset::Windows874 => Self::Whatwg(e::WINDOWS_874),
            Charset::Windows1250 => Self::Whatwg(e::WINDOWS_1250),
            Charset::Windows1251 => Self::Whatwg(e::WINDOWS_1251),
            Charset::Windows1252 => Self::Whatwg(e::WINDOWS_1252),
            Charset::Windows1253 => Self::Whatwg(e::WINDOWS_1253),
            Charset::Windows1254 => Self::Whatwg(e::WINDOWS_1254),
            Charset::Windows1255 => Self::Whatwg(e::WINDOWS_1255),
            Charset::Windows1256 => Self::Whatwg(e::WINDOWS_1256),
            Charset::Windows1257 => Self::Whatwg(e::WINDOWS_1257),
            Charset::Windows1258 => Self::Whatwg(e::WINDOWS_1258),
            Charset::ShiftJis => Self::Whatwg(e::SHIFT_JIS),
        }
    }
}

/// Decode raw bytes into code points.
///
/// Input that is already valid UTF-8 is taken as is under every charset
/// except the UTF-16 and UTF-32 forms, where the bytes are code units.
/// Bytes a Windows code page leaves undefined decode to U+FFFD.
///
/// # Errors
///
/// Returns [`Error::Decode`] for malformed UTF-8, UTF-16, UTF-32 or Shift_JIS
/// input. Single-byte code pages never fail.
///
/// # Examples
///
/// ```
/// use retrotext::decode::decode;
/// use retrotext::encoding::Charset;
///
/// let runes = decode(b"\xC9\xCD\xBB", Charset::Ibm437).unwrap();
/// assert_eq!(runes, vec!['╔', '═', '╗']);
/// ```
pub fn decode(bytes: &[u8], charset: Charset) -> Result<Vec<char>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let backend = Backend::of(charset);
    if !matches!(backend, Backend::Utf16 { .. } | Backend::Utf32 { .. }) {
        if let Ok(text) = std::str::from_utf8(bytes) {
            tracing::debug!(%charset, len = bytes.len(), "input is valid UTF-8, not transcoding");
            return Ok(text.chars().collect());
        }
    }
    tracing::debug!(%charset, len = bytes.len(), "transcoding");
    let runes = match backend {
        Backend::Utf8 => {
            return Err(Error::Decode {
                charset: charset.name(),
                reason: invalid_utf8_reason(bytes),
            })
        }
        Backend::Utf16 { big_endian, sniff_bom } => utf16(bytes, big_endian, sniff_bom, charset)?,
        Backend::Utf32 { big_endian } => utf32(bytes, big_endian, charset)?,
        Backend::Whatwg(encoding) if charset.is_single_byte() => {
            let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
            text.chars().collect()
        }
        Backend::Whatwg(encoding) => encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| Error::Decode {
                charset: charset.name(),
                reason: "malformed multi-byte sequence".to_string(),
            })?
            .chars()
            .collect(),
        Backend::Oem(upper) => bytes
            .iter()
            .map(|&b| if b < 0x80 { char::from(b) } else { upper[usize::from(b - 0x80)] })
            .collect(),
        Backend::Ebcdic(table) => bytes.iter().map(|&b| table[usize::from(b)]).collect(),
        Backend::Byte(f) => bytes.iter().map(|&b| f(b)).collect(),
    };
    Ok(if charset.family() == EncodingFamily::Windows {
        undefined_to_replacement(runes)
    } else {
        runes
    })
}

fn invalid_utf8_reason(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(_) => "valid".to_string(),
        Err(e) => e.to_string(),
    }
}

/// WHATWG decodes the holes of the Windows code pages as C1 controls.
fn undefined_to_replacement(mut runes: Vec<char>) -> Vec<char> {
    for r in &mut runes {
        if ('\u{0080}'..='\u{009F}').contains(r) {
            *r = char::REPLACEMENT_CHARACTER;
        }
    }
    runes
}

fn utf16(bytes: &[u8], big_endian: bool, sniff_bom: bool, charset: Charset) -> Result<Vec<char>> {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] if sniff_bom => (rest, true),
        [0xFF, 0xFE, rest @ ..] if sniff_bom => (rest, false),
        _ => (bytes, big_endian),
    };
    let encoding = if big_endian {
        encoding_rs::UTF_16BE
    } else {
        encoding_rs::UTF_16LE
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.chars().collect())
        .ok_or_else(|| Error::Decode {
            charset: charset.name(),
            reason: "odd length or unpaired surrogate".to_string(),
        })
}

fn utf32(bytes: &[u8], big_endian: bool, charset: Charset) -> Result<Vec<char>> {
    let units = bytes.chunks_exact(4);
    if !units.remainder().is_empty() {
        return Err(Error::Decode {
            charset: charset.name(),
            reason: format!("{} trailing bytes", units.remainder().len()),
        });
    }
    units
        .map(|unit| {
            let quad = [unit[0], unit[1], unit[2], unit[3]];
            let value = if big_endian {
                u32::from_be_bytes(quad)
            } else {
                u32::from_le_bytes(quad)
            };
            char::from_u32(value).ok_or_else(|| Error::Decode {
                charset: charset.name(),
                reason: format!("invalid scalar value {value:#X}"),
            })
        })
        .collect()
}

/// Encode text into the bytes of a charset.
///
/// For the IBM PC code pages the control pictures (☺, ♥, ⌂ …) map back to
/// the control bytes they stand for, so pictured text survives a round trip.
///
/// # Errors
///
/// Returns [`Error::Encode`] naming the first character the charset cannot
/// represent.
///
/// # Examples
///
/// ```
/// use retrotext::decode::encode;
/// use retrotext::encoding::Charset;
///
/// assert_eq!(encode("☺♥", Charset::Ibm437).unwrap(), vec![0x01, 0x03]);
/// assert!(encode("😃", Charset::Ibm437).is_err());
/// ```
pub fn encode(text: &str, charset: Charset) -> Result<Vec<u8>> {
    let unmappable = |character| Error::Encode {
        charset: charset.name(),
        character,
    };
    match Backend::of(charset) {
        Backend::Utf8 => Ok(text.as_bytes().to_vec()),
        Backend::Utf16 { big_endian, .. } => Ok(text
            .encode_utf16()
            .flat_map(|unit| if big_endian { unit.to_be_bytes() } else { unit.to_le_bytes() })
            .collect()),
        Backend::Utf32 { big_endian } => Ok(text
            .chars()
            .flat_map(|c| {
                let value = u32::from(c);
                if big_endian { value.to_be_bytes() } else { value.to_le_bytes() }
            })
            .collect()),
        Backend::Oem(upper) => text
            .chars()
            .map(|c| oem_byte(c, upper).ok_or_else(|| unmappable(c)))
            .collect(),
        Backend::Ebcdic(table) => text
            .chars()
            .map(|c| position(table, c).ok_or_else(|| unmappable(c)))
            .collect(),
        Backend::Byte(f) => text
            .chars()
            .map(|c| (0..=u8::MAX).find(|&b| f(b) == c).ok_or_else(|| unmappable(c)))
            .collect(),
        Backend::Whatwg(encoding) => {
            let mut out = Vec::with_capacity(text.len());
            let mut buf = [0u8; 4];
            for c in text.chars() {
                let (bytes, _, had_errors) = encoding.encode(c.encode_utf8(&mut buf));
                if had_errors {
                    return Err(unmappable(c));
                }
                out.extend_from_slice(&bytes);
            }
            Ok(out)
        }
    }
}

fn oem_byte(c: char, upper: &[char; 128]) -> Option<u8> {
    if c.is_ascii() {
        return Some(c as u8);
    }
    if let Some(i) = upper.iter().position(|&u| u == c) {
        return Some(0x80 + i as u8);
    }
    if c == tables::HOUSE {
        return Some(0x7F);
    }
    if c == tables::BROKEN_BAR {
        return Some(b'|');
    }
    tables::DOS_PICTURES.iter().position(|&p| p == c).map(|i| i as u8)
}

fn position(table: &[char; 256], c: char) -> Option<u8> {
    table.iter().position(|&t| t == c).map(|i| i as u8)
}

/// Every byte value in order, 0x00 through 0xFF.
///
/// Decoding this sequence gives the full character table of a code page.
#[must_use]
pub fn code_page_bytes() -> [u8; 256] {
    std::array::from_fn(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert!(decode(b"", Charset::Ibm037).unwrap().is_empty());
    }

    #[test]
    fn valid_utf8_is_kept_under_a_legacy_charset() {
        let runes = decode("café ☺".as_bytes(), Charset::Ibm437).unwrap();
        assert_eq!(runes.iter().collect::<String>(), "café ☺");
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = decode(b"abc\xFF", Charset::Utf8).unwrap_err();
        assert!(matches!(err, Error::Decode { charset: "UTF-8", .. }));
    }

    #[test]
    fn cp437_box_drawing() {
        let runes = decode(b"\xDA\xC4\xBF\xFF", Charset::Ibm437).unwrap();
        assert_eq!(runes, vec!['┌', '─', '┐', '\u{00A0}']);
    }

    #[test]
    fn ebcdic_hello() {
        let runes = decode(b"\xC8\x85\x93\x93\x96\xFF", Charset::Ibm037).unwrap();
        assert_eq!(runes.iter().take(5).collect::<String>(), "Hello");
    }

    #[test]
    fn latin1_and_latin5_differ_on_turkish_letters() {
        assert_eq!(decode(b"\xDD\xFF", Charset::Iso8859_1).unwrap(), vec!['Ý', 'ÿ']);
        assert_eq!(decode(b"\xDD\xFF", Charset::Iso8859_9).unwrap(), vec!['İ', 'ÿ']);
    }

    #[test]
    fn windows_holes_become_replacement() {
        // 0x81 is undefined in windows-1252, 0x80 is the euro sign.
        let runes = decode(b"\x80\x81", Charset::Windows1252).unwrap();
        assert_eq!(runes, vec!['€', char::REPLACEMENT_CHARACTER]);
    }

    #[test]
    fn single_byte_whatwg_is_total() {
        // 0xAA is unassigned in windows-1253.
        let runes = decode(b"\xAA\xE1", Charset::Windows1253).unwrap();
        assert_eq!(runes, vec![char::REPLACEMENT_CHARACTER, 'α']);
    }

    #[test]
    fn shift_jis_malformed_is_an_error() {
        assert!(decode(b"\x82", Charset::ShiftJis).is_err());
        assert_eq!(
            decode(b"\x82\xA0", Charset::ShiftJis).unwrap(),
            vec!['あ']
        );
    }

    #[test]
    fn utf16_with_and_without_bom() {
        assert_eq!(decode(b"A\0B\0", Charset::Utf16Le).unwrap(), vec!['A', 'B']);
        assert_eq!(decode(b"\0A\0B", Charset::Utf16Be).unwrap(), vec!['A', 'B']);
        assert_eq!(decode(b"\xFF\xFEA\0", Charset::Utf16).unwrap(), vec!['A']);
        assert_eq!(decode(b"\xFE\xFF\0A", Charset::Utf16).unwrap(), vec!['A']);
        assert!(decode(b"A\0B", Charset::Utf16Le).is_err());
    }

    #[test]
    fn utf32_units() {
        assert_eq!(decode(b"A\0\0\0", Charset::Utf32Le).unwrap(), vec!['A']);
        assert_eq!(
            decode(b"\0\x01\xF6\x03", Charset::Utf32Be).unwrap(),
            vec!['😃']
        );
        assert!(decode(b"A\0\0", Charset::Utf32Le).is_err());
        assert!(decode(b"\0\0\xD8\0", Charset::Utf32Be).is_err());
    }

    #[test]
    fn encode_cp437_pictures_round_trip() {
        let bytes = encode("☺☻⌂╬", Charset::Ibm437).unwrap();
        assert_eq!(bytes, vec![0x01, 0x02, 0x7F, 0xCE]);
    }

    #[test]
    fn encode_unmappable_names_the_character() {
        match encode("abc😃", Charset::Windows1252) {
            Err(Error::Encode { character, .. }) => assert_eq!(character, '😃'),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn encode_ebcdic_and_latin5() {
        assert_eq!(encode("Hi", Charset::Ibm037).unwrap(), vec![0xC8, 0x89]);
        assert_eq!(encode("İ", Charset::Iso8859_9).unwrap(), vec![0xDD]);
        assert_eq!(encode("AB", Charset::Utf16Le).unwrap(), b"A\0B\0".to_vec());
    }

    #[test]
    fn code_page_bytes_is_every_byte() {
        let bytes = code_page_bytes();
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[0x41], b'A');
        assert_eq!(bytes[255], 255);
    }

    #[test]
    fn single_byte_code_pages_decode_one_char_per_byte() {
        let bytes = code_page_bytes();
        for &charset in Charset::all().iter().filter(|c| c.is_single_byte()) {
            assert_eq!(decode(&bytes, charset).unwrap().len(), 256, "{charset}");
        }
    }
}
