//! Newline detection, DOS end-of-file truncation and text counters.

use std::fmt;

use crate::encoding::tables;

/// DOS soft end-of-file marker, Ctrl-Z.
pub const SUB: u8 = 0x1A;

/// A line terminator of one or two code points.
///
/// Single code point terminators store `'\0'` as the second element. The
/// default value is [`Newline::NONE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Newline([char; 2]);

impl Newline {
    /// No terminator was found.
    pub const NONE: Self = Self(['\0', '\0']);
    /// Carriage return then line feed (DOS, Windows).
    pub const CRLF: Self = Self(['\r', '\n']);
    /// Line feed then carriage return (Acorn, RISC OS).
    pub const LFCR: Self = Self(['\n', '\r']);
    /// Line feed (Unix, Amiga).
    pub const LF: Self = Self(['\n', '\0']);
    /// Carriage return (Commodore, classic Macintosh).
    pub const CR: Self = Self(['\r', '\0']);
    /// EBCDIC new line control, 0x15.
    pub const NL: Self = Self(['\u{0015}', '\0']);
    /// Unicode next line, which EBCDIC NL decodes to.
    pub const NEL: Self = Self(['\u{0085}', '\0']);

    /// Find the CR and LF terminator at the first position that holds one.
    ///
    /// NL and NEL are ordinary characters outside EBCDIC, so they are not
    /// considered here. See [`Newline::detect_ebcdic`].
    ///
    /// ```
    /// use retrotext::newline::Newline;
    ///
    /// let text: Vec<char> = "one\r\ntwo\n".chars().collect();
    /// assert_eq!(Newline::detect(&text), Newline::CRLF);
    /// ```
    #[must_use]
    pub fn detect(runes: &[char]) -> Self {
        Self::scan(runes, false)
    }

    /// Like [`Newline::detect`], but EBCDIC NL and NEL also terminate lines.
    #[must_use]
    pub fn detect_ebcdic(runes: &[char]) -> Self {
        Self::scan(runes, true)
    }

    fn scan(runes: &[char], ebcdic: bool) -> Self {
        for (i, &r) in runes.iter().enumerate() {
            let next = runes.get(i + 1).copied();
            let found = match (r, next) {
                ('\r', Some('\n')) => Self::CRLF,
                ('\n', Some('\r')) => Self::LFCR,
                ('\n', _) => Self::LF,
                ('\r', _) => Self::CR,
                ('\u{0015}', _) if ebcdic => Self::NL,
                ('\u{0085}', _) if ebcdic => Self::NEL,
                _ => continue,
            };
            tracing::trace!(newline = found.name(), at = i, "newline detected");
            return found;
        }
        Self::NONE
    }

    /// The raw pair.
    #[must_use]
    pub fn pair(self) -> [char; 2] {
        self.0
    }

    /// Number of code points in the terminator, 0 for [`Newline::NONE`].
    #[must_use]
    pub fn width(self) -> usize {
        self.0.iter().take_while(|&&c| c != '\0').count()
    }

    /// Whether no terminator was found.
    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Whether the terminator starts at `runes[i]`.
    #[must_use]
    pub fn matches_at(self, runes: &[char], i: usize) -> bool {
        match self.width() {
            1 => runes.get(i) == Some(&self.0[0]),
            2 => runes.get(i..i + 2) == Some(&self.0[..]),
            _ => false,
        }
    }

    /// Abbreviation such as `CRLF`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CRLF => "CRLF",
            Self::LFCR => "LFCR",
            Self::LF => "LF",
            Self::CR => "CR",
            Self::NL => "NL",
            Self::NEL => "NEL",
            _ => "none",
        }
    }

    /// Abbreviation plus the platforms that use it.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::CRLF => "CRLF (Windows, DOS)",
            Self::LFCR => "LFCR (Acorn BBC, RISC OS)",
            Self::LF => "LF (Linux, Unix, macOS, Amiga)",
            Self::CR => "CR (Commodore, classic Macintosh)",
            Self::NL => "NL (IBM EBCDIC)",
            Self::NEL => "NEL (IBM EBCDIC)",
            _ => "none",
        }
    }

    /// The terminator as a string.
    #[must_use]
    pub fn as_string(self) -> String {
        self.0.iter().take(self.width()).collect()
    }

    fn split(self, runes: &[char]) -> Vec<&[char]> {
        let width = self.width();
        if width == 0 {
            return vec![runes];
        }
        let mut lines = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < runes.len() {
            if self.matches_at(runes, i) {
                lines.push(&runes[start..i]);
                i += width;
                start = i;
            } else {
                i += 1;
            }
        }
        lines.push(&runes[start..]);
        lines
    }
}

impl fmt::Display for Newline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cut raw bytes at the first DOS end-of-file marker.
///
/// A marker at offset 0 is left in place so the document is never emptied by
/// its first byte.
///
/// ```
/// use retrotext::newline::trim_eof;
///
/// assert_eq!(trim_eof(b"Hello\x1Aworld"), b"Hello");
/// assert_eq!(trim_eof(b"\x1Aworld"), b"\x1Aworld");
/// ```
#[must_use]
pub fn trim_eof(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == SUB) {
        Some(i) if i > 0 => {
            tracing::debug!(at = i, dropped = bytes.len() - i, "truncated at end-of-file marker");
            &bytes[..i]
        }
        _ => bytes,
    }
}

/// Count lines. Empty text has none; a trailing terminator does not start a new line.
#[must_use]
pub fn lines(runes: &[char], newline: Newline) -> usize {
    if runes.is_empty() {
        return 0;
    }
    let parts = newline.split(runes);
    match parts.last() {
        Some(last) if last.is_empty() => parts.len() - 1,
        _ => parts.len(),
    }
}

/// Width of the longest line in code points.
#[must_use]
pub fn columns(runes: &[char], newline: Newline) -> usize {
    newline.split(runes).iter().map(|line| line.len()).max().unwrap_or(0)
}

/// Count words made only of letters, digits and punctuation.
#[must_use]
pub fn words(runes: &[char]) -> usize {
    let text: String = runes.iter().collect();
    text.split_whitespace()
        .filter(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(first), _) if first >= char::REPLACEMENT_CHARACTER => false,
                (Some(only), None) => only.is_alphanumeric(),
                _ => token.chars().all(|c| c.is_alphanumeric() || is_punctuation(c)),
            }
        })
        .count()
}

/// Count words in raw EBCDIC bytes. Any EBCDIC code page will do for this
/// purpose, so code page 037 is used.
#[must_use]
pub fn words_ebcdic(bytes: &[u8]) -> usize {
    let runes: Vec<char> = bytes.iter().map(|&b| tables::CP037[usize::from(b)]).collect();
    words(&runes)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c, '¡' | '«' | '·' | '»' | '¿' | '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn detect_pairs() {
        assert_eq!(Newline::detect(&runes("a\r\nb")), Newline::CRLF);
        assert_eq!(Newline::detect(&runes("a\n\rb")), Newline::LFCR);
        assert_eq!(Newline::detect(&runes("a\nb")), Newline::LF);
        assert_eq!(Newline::detect(&runes("a\rb")), Newline::CR);
        assert_eq!(Newline::detect_ebcdic(&runes("a\u{0085}b")), Newline::NEL);
        assert_eq!(Newline::detect_ebcdic(&runes("a\u{0015}b")), Newline::NL);
        assert_eq!(Newline::detect(&runes("abc")), Newline::NONE);
        assert_eq!(Newline::detect(&[]), Newline::NONE);
    }

    #[test]
    fn nl_and_nel_are_ebcdic_only() {
        assert_eq!(Newline::detect(&runes("a\u{0015}b\r\n")), Newline::CRLF);
        assert_eq!(Newline::detect(&runes("\u{0085}\r\nx")), Newline::CRLF);
        assert_eq!(Newline::detect(&runes("a\u{0085}b")), Newline::NONE);
        assert_eq!(Newline::detect_ebcdic(&runes("a\u{0085}b\n")), Newline::NEL);
    }

    #[test]
    fn detect_uses_first_terminator() {
        assert_eq!(Newline::detect(&runes("a\nb\r\nc\r\n")), Newline::LF);
        assert_eq!(Newline::detect(&runes("trailing\r")), Newline::CR);
    }

    #[test]
    fn width_and_names() {
        assert_eq!(Newline::CRLF.width(), 2);
        assert_eq!(Newline::LF.width(), 1);
        assert_eq!(Newline::NONE.width(), 0);
        assert_eq!(Newline::CRLF.to_string(), "CRLF");
        assert_eq!(Newline::CRLF.describe(), "CRLF (Windows, DOS)");
        assert_eq!(Newline::LFCR.as_string(), "\n\r");
    }

    #[test]
    fn matches_at_bounds() {
        let text = runes("ab\r");
        assert!(!Newline::CRLF.matches_at(&text, 2));
        assert!(Newline::CR.matches_at(&text, 2));
        assert!(!Newline::NONE.matches_at(&text, 0));
    }

    #[test]
    fn eof_marker() {
        assert_eq!(trim_eof(b"Hello\x1Aworld"), b"Hello");
        assert_eq!(trim_eof(b"Hello"), b"Hello");
        assert_eq!(trim_eof(b"\x1A"), b"\x1A");
        assert_eq!(trim_eof(b"a\x1Ab\x1Ac"), b"a");
    }

    #[test]
    fn count_lines() {
        assert_eq!(lines(&[], Newline::LF), 0);
        assert_eq!(lines(&runes("one"), Newline::NONE), 1);
        assert_eq!(lines(&runes("a\r\nb"), Newline::CRLF), 2);
        assert_eq!(lines(&runes("a\r\nb\r\n"), Newline::CRLF), 2);
        assert_eq!(lines(&runes("a\n\nb"), Newline::LF), 3);
    }

    #[test]
    fn count_columns() {
        assert_eq!(columns(&runes("ab\nabcd\nabc"), Newline::LF), 4);
        assert_eq!(columns(&runes("ab\r\nabcde"), Newline::CRLF), 5);
        assert_eq!(columns(&[], Newline::LF), 0);
    }

    #[test]
    fn count_words() {
        assert_eq!(words(&runes("Hello, world! 42 times")), 4);
        assert_eq!(words(&runes("a ☺ b")), 2);
        assert_eq!(words(&runes("  ")), 0);
        assert_eq!(words(&runes("\u{FFFD}abc def")), 1);
    }

    #[test]
    fn count_words_in_ebcdic() {
        // "Hi there" in code page 037.
        let bytes = b"\xC8\x89\x40\xA3\x88\x85\x99\x85";
        assert_eq!(words_ebcdic(bytes), 2);
    }
}
