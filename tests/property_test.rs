use proptest::prelude::*;
use retrotext::decode::{decode, encode};
use retrotext::encoding::{Charset, EncodingFamily};
use retrotext::glyph::{substitute, Skip};
use retrotext::{ansi, convert_with_options, Mode, Options};

fn single_byte_charsets() -> Vec<Charset> {
    Charset::all().iter().copied().filter(|c| c.is_single_byte()).collect()
}

fn not_utf16_or_32(charset: Charset) -> bool {
    !matches!(
        charset,
        Charset::Utf16 | Charset::Utf16Be | Charset::Utf16Le | Charset::Utf32Be | Charset::Utf32Le
    )
}

proptest! {
    #[test]
    fn valid_utf8_decodes_unchanged(s in "\\PC*", i in 0usize..64) {
        let charsets: Vec<Charset> = Charset::all().iter().copied().filter(|&c| not_utf16_or_32(c)).collect();
        let charset = charsets[i % charsets.len()];
        let runes = decode(s.as_bytes(), charset).unwrap();
        prop_assert_eq!(runes, s.chars().collect::<Vec<_>>());
    }

    #[test]
    fn single_byte_conversion_keeps_length(bytes in prop::collection::vec(any::<u8>(), 0..256), i in 0usize..64) {
        let charsets = single_byte_charsets();
        let charset = charsets[i % charsets.len()];
        // 0xFF is never valid UTF-8, so the code page path is always taken.
        let mut input = vec![0xFF];
        input.extend(bytes);
        let options = Options { encoding: charset.name().to_string(), ..Options::default() };
        let result = convert_with_options(&input, Mode::Dump, &options).unwrap();
        prop_assert_eq!(result.runes.len(), input.len());
    }

    #[test]
    fn ansi_normalize_is_idempotent(s in "[\\[←␛a-z0-9;]*") {
        let mut once: Vec<char> = s.chars().collect();
        ansi::normalize(&mut once);
        let mut twice = once.clone();
        ansi::normalize(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cp437_pictures_encode_back(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut input = vec![0xFF];
        input.extend(bytes);
        let mut runes = decode(&input, Charset::Ibm437).unwrap();
        substitute(&mut runes, EncodingFamily::Dos, &Skip::default());
        let text: String = runes.into_iter().collect();
        prop_assert_eq!(encode(&text, Charset::Ibm437).unwrap(), input);
    }
}

#[test]
fn cp437_smiley_round_trip() {
    let mut runes = decode(b"\x01\xff", Charset::Ibm437).unwrap();
    substitute(&mut runes, EncodingFamily::Dos, &Skip::default());
    assert_eq!(runes[0], '\u{263A}');
    assert_eq!(encode("\u{263A}", Charset::Ibm437).unwrap(), vec![0x01]);
}
