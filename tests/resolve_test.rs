use retrotext::encoding::{resolve, Charset, EncodingFamily};
use retrotext::Error;

/// Names people actually type, and what they resolve to.
#[test]
fn everyday_names_resolve() {
    let cases = [
        ("ibm437", Charset::Ibm437),
        ("CP437", Charset::Ibm437),
        ("IBM Code Page 437", Charset::Ibm437),
        ("CP-437", Charset::Ibm437),
        ("msdos", Charset::Ibm437),
        ("ibm-37", Charset::Ibm037),
        ("858", Charset::Ibm858),
        ("Windows Code Page 858", Charset::Ibm858),
        ("mac", Charset::Macintosh),
        ("cp1004", Charset::Windows1252),
        ("latin1", Charset::Iso8859_1),
        ("oem-850", Charset::Ibm850),
        ("oem-852", Charset::Ibm852),
        ("oem-855", Charset::Ibm855),
        ("oem-860", Charset::Ibm860),
        ("oem-862", Charset::Ibm862),
        ("oem-863", Charset::Ibm863),
        ("oem-865", Charset::Ibm865),
        ("oem-866", Charset::Ibm866),
        ("oem-1047", Charset::Ibm1047),
        ("oem-1140", Charset::Ibm1140),
        ("cp28591", Charset::Iso8859_1),
        ("windows-28592", Charset::Iso8859_2),
        ("cp919", Charset::Iso8859_10),
        ("cp874", Charset::Windows874),
        ("iso-8859-11", Charset::Windows874),
        ("cp878", Charset::Koi8R),
        ("cp1168", Charset::Koi8U),
        ("cp10000", Charset::Macintosh),
        ("shift jis", Charset::ShiftJis),
        ("iso8859-15", Charset::Iso8859_15),
        ("ISO 8859-5", Charset::Iso8859_5),
    ];
    for (name, want) in cases {
        assert_eq!(resolve(name).unwrap(), want, "{name}");
    }
}

#[test]
fn windows_code_pages_by_oem_number() {
    let cases = [
        ("oem-1250", Charset::Windows1250),
        ("oem-1251", Charset::Windows1251),
        ("oem-1252", Charset::Windows1252),
        ("oem-1253", Charset::Windows1253),
        ("oem-1254", Charset::Windows1254),
        ("oem-1255", Charset::Windows1255),
        ("oem-1256", Charset::Windows1256),
        ("oem-1257", Charset::Windows1257),
        ("oem-1258", Charset::Windows1258),
    ];
    for (name, want) in cases {
        assert_eq!(resolve(name).unwrap(), want, "{name}");
        assert_eq!(want.family(), EncodingFamily::Windows);
    }
}

#[test]
fn unknown_names_report_both_forms() {
    match resolve("CP-9999") {
        Err(Error::UnresolvedEncoding { name, normalized }) => {
            assert_eq!(name, "CP-9999");
            assert_eq!(normalized, "9999");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(resolve("klingon").is_err());
}

#[test]
fn every_charset_resolves_by_its_own_name() {
    for &charset in Charset::all() {
        assert_eq!(resolve(charset.name()).unwrap(), charset, "{charset}");
        assert_eq!(resolve(&charset.name().to_lowercase()).unwrap(), charset, "{charset}");
    }
}
