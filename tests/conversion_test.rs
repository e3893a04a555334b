use retrotext::encoding::Charset;
use retrotext::{ansi, chars, convert, convert_with_options, dump, text, Control, Mode, Newline, Options, Session, Swap};

fn with(encoding: &str) -> Options {
    Options {
        encoding: encoding.to_string(),
        ..Options::default()
    }
}

#[test]
fn cp437_accents_and_symbols() {
    let got = text(b"H\x82ll\x93 \x9d\xa7\xf4\x9c\xbe", &with("cp437")).unwrap();
    assert_eq!(got, "Héllô ¥º⌠£╛");
}

#[test]
fn koi8r_cyrillic() {
    assert_eq!(text(b"\xf5\xf2\xf3\xf3", &with("koi8-r")).unwrap(), "УРСС");
}

#[test]
fn cp037_ebcdic() {
    assert_eq!(text(b"\xc8\x51\xba\x93\xcf", &with("cp037")).unwrap(), "Hé[lõ");
}

#[test]
fn ebcdic_line_feed_is_kept() {
    let got = convert_with_options(b"\xc8\x85\x93\x93\x96\x25\xe6\x96\x99\x93\x84", Mode::Text, &with("ibm037")).unwrap();
    assert_eq!(got.text(), "Hello\nWorld");
    assert_eq!(got.newline, Newline::LF);
    assert_eq!(got.lines(), 2);
}

/// Text obeys the end-of-file marker.
#[test]
fn text_stops_at_eof() {
    assert_eq!(text(b"Hello\x1Aworld", &with("cp437")).unwrap(), "Hello");
}

/// Dump only obeys the marker when asked to.
#[test]
fn dump_reads_past_eof_unless_asked() {
    assert_eq!(dump(b"Hello\x1Aworld", &with("cp437")).unwrap(), "Hello→world");
    let options = Options {
        controls: vec![Control::Eof],
        ..with("cp437")
    };
    assert_eq!(dump(b"Hello\x1Aworld", &options).unwrap(), "Hello");
}

#[test]
fn eof_at_the_start_is_kept() {
    assert_eq!(text(b"\x1Aworld", &with("cp437")).unwrap(), "→world");
}

#[test]
fn cp437_section_sign_is_not_a_newline() {
    let got = convert_with_options(b"\xb0\x15\r\n\xb0", Mode::Text, &with("cp437")).unwrap();
    assert_eq!(got.text(), "░§\r\n░");
    assert_eq!(got.newline, Newline::CRLF);
}

#[test]
fn latin_next_line_control_is_not_a_newline() {
    let got = convert_with_options(b"\x85\r\nx\xff", Mode::Text, &with("iso-8859-1")).unwrap();
    assert_eq!(got.text(), " \r\nxÿ");
    assert_eq!(got.newline, Newline::CRLF);
}

#[test]
fn cp437_smileys_keep_the_newline() {
    let got = convert_with_options(b"\x01\x02\x0D\x0A", Mode::Text, &with("cp437")).unwrap();
    assert_eq!(got.text(), "☺☻\r\n");
    assert_eq!(got.newline, Newline::CRLF);
    assert_eq!(got.charset, Charset::Ibm437);
}

#[test]
fn chars_pictures_newlines_too() {
    assert_eq!(chars(b"\x01\x02\x0D\x0A", &with("cp437")).unwrap(), "☺☻♪◙");
}

#[test]
fn ansi_escapes_survive_cp437_and_cp1252() {
    assert_eq!(ansi(b"\x1b[0m", &with("cp437")).unwrap(), "\x1b[0m");
    assert_eq!(ansi(b"\x1b[0m", &with("cp1252")).unwrap(), "\x1b[0m");
    assert_eq!(ansi(b"\x1b[1;31m\xdb\xb2\x1b[0m", &with("cp437")).unwrap(), "\x1b[1;31m█▓\x1b[0m");
}

#[test]
fn lone_escape_stays_pictured() {
    assert_eq!(text(b"\x1b", &with("cp1252")).unwrap(), "␛");
    assert_eq!(text(b"\x1b", &with("cp437")).unwrap(), "←");
}

#[test]
fn chars_leaves_escapes_pictured() {
    assert_eq!(chars(b"\x1b[0m", &with("cp437")).unwrap(), "←[0m");
}

#[test]
fn latin_controls_are_blanked() {
    assert_eq!(text(b"a\x01b\x7f\x81c\xff", &with("iso-8859-1")).unwrap(), "a b  cÿ");
}

#[test]
fn hebrew_and_arabic_variants_blank_delete_and_c1() {
    for name in ["iso-8859-8-i", "iso-8859-8-e", "iso-8859-6-i", "iso-8859-6-e"] {
        assert_eq!(text(b"a\x7f\x85b", &with(name)).unwrap(), "a  b", "{name}");
        assert_eq!(text(b"\x07", &with(name)).unwrap(), "␇", "{name}");
    }
}

#[test]
fn latin5_differs_from_latin1() {
    assert_eq!(text(b"\xdd\xfd\xff", &with("iso-8859-9")).unwrap(), "İıÿ");
    assert_eq!(text(b"\xdd\xfd\xff", &with("iso-8859-1")).unwrap(), "Ýýÿ");
}

#[test]
fn windows_holes_are_blanked() {
    assert_eq!(text(b"\x81\x80", &with("windows-1252")).unwrap(), " €");
    assert_eq!(text(b"\x7f\x80", &with("windows-1252")).unwrap(), "⌂€");
}

#[test]
fn macintosh_modifier_keys() {
    assert_eq!(text(b"\x11\x12\x13\x14\xa5", &with("mac")).unwrap(), "⌘⇧⌥⌃•");
}

#[test]
fn koi8_controls_are_blanked() {
    assert_eq!(text(b"\x01\xf5", &with("koi8-r")).unwrap(), " У");
}

#[test]
fn visual_hebrew_keeps_control_pictures() {
    assert_eq!(text(b"\x01\xe0", &with("iso-8859-8-i")).unwrap(), "␁א");
}

#[test]
fn utf8_pictures_controls_generically() {
    let got = convert(b"caf\xc3\xa9\x07\x7f\xc2\x85").unwrap();
    assert_eq!(got.text(), "café␇\u{7f}\u{85}");
    assert_eq!(got.charset, Charset::Utf8);
}

#[test]
fn malformed_shift_jis_is_an_error() {
    assert!(text(b"\x82", &with("shift_jis")).is_err());
    assert_eq!(text(b"\x82\xa0", &with("shift_jis")).unwrap(), "あ");
}

#[test]
fn unknown_encoding_is_an_error() {
    let err = text(b"abc", &with("cp9999")).unwrap_err();
    assert!(err.to_string().contains("cp9999"));
}

#[test]
fn empty_input_is_empty_output() {
    for mode in [Mode::Text, Mode::Ansi, Mode::Dump, Mode::Chars] {
        let got = convert_with_options(b"", mode, &with("cp437")).unwrap();
        assert!(got.runes.is_empty());
        assert_eq!(got.newline, Newline::NONE);
    }
}

#[test]
fn ignored_controls_are_kept() {
    assert_eq!(text(b"a\tb", &with("cp437")).unwrap(), "a○b");
    let options = Options {
        controls: vec![Control::Tab],
        ..with("cp437")
    };
    assert_eq!(text(b"a\tb", &options).unwrap(), "a\tb");
}

#[test]
fn swaps_apply_to_text_but_not_ansi() {
    let options = Options {
        swaps: vec![Swap::House, Swap::Bar],
        ..with("cp437")
    };
    assert_eq!(text(b"\x7f|", &options).unwrap(), "Δ|");
    assert_eq!(ansi(b"\x7f|", &options).unwrap(), "⌂¦");
}

#[test]
fn wrapping_cuts_long_text() {
    let options = Options {
        max_width: 4,
        ..Options::default()
    };
    assert_eq!(text(b"abcdefghij", &options).unwrap(), "abcd\nefgh\nij\n");
    assert_eq!(text(b"ab\r\ncd", &options).unwrap(), "ab c\nd\n");
    let wide = Options {
        max_width: 10,
        ..Options::default()
    };
    assert_eq!(text(b"ab\r\ncd", &wide).unwrap(), "ab cd");
}

#[test]
fn conversion_carries_the_sauce_record() {
    let mut file = b"\xdb\x1a".to_vec();
    let mut record = b"SAUCE00".to_vec();
    record.extend(b"Blocks");
    record.resize(128, b' ');
    record[94] = 1;
    file.extend(record);

    let got = convert_with_options(&file, Mode::Text, &with("cp437")).unwrap();
    assert_eq!(got.text(), "█");
    assert_eq!(got.sauce.expect("sauce").title, "Blocks");
    assert!(convert(b"plain").unwrap().sauce.is_none());
}

#[test]
fn session_without_line_breaks_pictures_the_newline() {
    let mut session = Session::new(b"a\r\nb".to_vec(), Charset::Ibm437);
    session.set_line_breaks(false);
    session.decode().unwrap();
    session.substitute();
    assert_eq!(session.runes().iter().collect::<String>(), "a♪◙b");
    assert_eq!(session.newline(), Newline::CRLF);
}

#[test]
fn session_ignore_and_swap() {
    let mut session = Session::with_options(b"\x07\x7f".to_vec(), &with("cp437")).unwrap();
    session.ignore('\u{7}');
    session.decode().unwrap();
    session.substitute();
    session.normalize_ansi();
    session.swap(&[Swap::House]);
    let conversion = session.into_conversion();
    assert_eq!(conversion.text(), "\u{7}Δ");
}
