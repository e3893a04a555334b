//! Control code pictures.
//!
//! Legacy text is full of bytes below 0x20 that a terminal would act on
//! rather than draw. Depending on the encoding family these become the
//! glyphs an IBM PC would have shown, the Unicode control pictures
//! (U+2400 block), or plain spaces.
//!
//! Each family has one [`Substitute`] strategy, looked up once per pass from
//! a static table. A pass walks the code points in place and never changes
//! their number.

use crate::encoding::tables::{BROKEN_BAR, DOS_PICTURES, HOUSE};
use crate::encoding::EncodingFamily;
use crate::newline::Newline;

const SPACE: char = ' ';
const NBSP: char = '\u{00A0}';
const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Control picture for DEL, ␡.
pub const DELETE_PICTURE: char = '\u{2421}';

/// Control picture for the C0 control `c` (0x00-0x1F).
fn control_picture(c: u32) -> char {
    char::from_u32(0x2400 + c).unwrap_or(REPLACEMENT)
}

/// Maps one code point to its displayed form.
pub trait Substitute: Sync {
    /// The replacement for `r`, or `r` itself.
    fn picture(&self, r: char) -> char;
}

/// C0 controls become their Unicode pictures. DEL and the C1 range are left
/// for the family pass that follows.
struct Generic;

impl Substitute for Generic {
    fn picture(&self, r: char) -> char {
        match u32::from(r) {
            c @ 0x00..=0x1F => control_picture(c),
            _ => r,
        }
    }
}

struct Ebcdic;

impl Substitute for Ebcdic {
    fn picture(&self, r: char) -> char {
        match u32::from(r) {
            0x05 => '\u{2405}',
            0x06 => '\u{2406}',
            0x07 => '\u{2407}',
            0x08 => '\u{2408}',
            0x09 => '\u{2409}',
            0x0A => '\u{240A}',
            0x14 => '\u{2414}',
            0x15 => '\u{2415}',
            0x16 => '\u{2416}',
            0x17 => '\u{2417}',
            0x1A => '\u{241A}',
            0x1B => '\u{241B}',
            0x7F => DELETE_PICTURE,
            0x85 => '\u{2424}',
            0x96 => '\u{2404}',
            0xA0 => NBSP,
            c @ (0x00..=0x03 | 0x0B..=0x13 | 0x18 | 0x19 | 0x1C..=0x1F) => control_picture(c),
            // No picture exists for these, they are blanked.
            0x04 | 0x80..=0x84 | 0x86..=0x95 | 0x97..=0x9F | 0xA1 => SPACE,
            _ => r,
        }
    }
}

/// The glyphs of the IBM PC character ROM.
struct Dos;

impl Substitute for Dos {
    fn picture(&self, r: char) -> char {
        match u32::from(r) {
            c @ 0x00..=0x1F => DOS_PICTURES[c as usize],
            0x7C => BROKEN_BAR,
            0x7F => HOUSE,
            _ => r,
        }
    }
}

struct Latin;

impl Substitute for Latin {
    fn picture(&self, r: char) -> char {
        match r {
            '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' | REPLACEMENT => SPACE,
            _ => r,
        }
    }
}

/// Generic pictures first, then whatever is left is blanked as Latin.
struct LatinControls;

impl Substitute for LatinControls {
    fn picture(&self, r: char) -> char {
        Latin.picture(Generic.picture(r))
    }
}

struct Koi8;

impl Substitute for Koi8 {
    fn picture(&self, r: char) -> char {
        match r {
            '\u{0000}'..='\u{001F}' | '\u{007F}' | REPLACEMENT => SPACE,
            _ => r,
        }
    }
}

struct Macintosh;

impl Substitute for Macintosh {
    fn picture(&self, r: char) -> char {
        match r {
            '\u{0011}' => '\u{2318}', // ⌘ command
            '\u{0012}' => '\u{21E7}', // ⇧ shift
            '\u{0013}' => '\u{2325}', // ⌥ option
            '\u{0014}' => '\u{2303}', // ⌃ control
            '\u{007F}' => HOUSE,
            REPLACEMENT => SPACE,
            _ => Generic.picture(r),
        }
    }
}

struct Windows;

impl Substitute for Windows {
    fn picture(&self, r: char) -> char {
        match r {
            '\u{007F}' => HOUSE,
            REPLACEMENT => SPACE,
            _ => Generic.picture(r),
        }
    }
}

/// Strategy per family, in [`EncodingFamily`] declaration order.
static STRATEGIES: [(EncodingFamily, &dyn Substitute); 9] = [
    (EncodingFamily::Ebcdic, &Ebcdic),
    (EncodingFamily::Dos, &Dos),
    (EncodingFamily::Latin, &Latin),
    (EncodingFamily::LatinControls, &LatinControls),
    (EncodingFamily::Koi8, &Koi8),
    (EncodingFamily::Macintosh, &Macintosh),
    (EncodingFamily::Windows, &Windows),
    (EncodingFamily::Unicode, &Generic),
    (EncodingFamily::Default, &Generic),
];

/// The substitution strategy of a family.
#[must_use]
pub fn strategy(family: EncodingFamily) -> &'static dyn Substitute {
    STRATEGIES
        .iter()
        .find(|(f, _)| *f == family)
        .map_or(&Generic as &dyn Substitute, |&(_, s)| s)
}

/// Positions a substitution pass leaves alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skip<'a> {
    /// Terminator to keep intact.
    pub newline: Newline,
    /// Whether the terminator is kept at all.
    pub line_breaks: bool,
    /// Code points to keep as they are.
    pub ignore: &'a [char],
}

impl Skip<'_> {
    /// How many positions to skip at `i`, if any.
    fn at(&self, runes: &[char], i: usize) -> Option<usize> {
        if self.line_breaks && self.newline.matches_at(runes, i) {
            return Some(self.newline.width());
        }
        self.ignore.contains(&runes[i]).then_some(1)
    }
}

/// Replace control codes in place using the strategy of `family`.
///
/// ```
/// use retrotext::encoding::EncodingFamily;
/// use retrotext::glyph::{substitute, Skip};
/// use retrotext::newline::Newline;
///
/// let mut runes: Vec<char> = "\u{1}\u{2}\r\n".chars().collect();
/// let skip = Skip { newline: Newline::CRLF, line_breaks: true, ignore: &[] };
/// substitute(&mut runes, EncodingFamily::Dos, &skip);
/// assert_eq!(runes.iter().collect::<String>(), "☺☻\r\n");
/// ```
pub fn substitute(runes: &mut [char], family: EncodingFamily, skip: &Skip<'_>) {
    let strategy = strategy(family);
    let mut i = 0;
    while i < runes.len() {
        if let Some(n) = skip.at(runes, i) {
            i += n;
            continue;
        }
        runes[i] = strategy.picture(runes[i]);
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, family: EncodingFamily, skip: &Skip<'_>) -> String {
        let mut runes: Vec<char> = text.chars().collect();
        substitute(&mut runes, family, skip);
        runes.into_iter().collect()
    }

    fn lf() -> Skip<'static> {
        Skip {
            newline: Newline::LF,
            line_breaks: true,
            ignore: &[],
        }
    }

    #[test]
    fn dos_smileys_pipe_and_house() {
        assert_eq!(run("\0\u{1}|\u{7F}", EncodingFamily::Dos, &lf()), "␀☺¦⌂");
        assert_eq!(run("\u{1B}[0m", EncodingFamily::Dos, &lf()), "←[0m");
    }

    #[test]
    fn dos_keeps_newline_but_pictures_stray_cr() {
        assert_eq!(run("a\rb\nc", EncodingFamily::Dos, &lf()), "a♪b\nc");
    }

    #[test]
    fn without_line_breaks_newlines_are_pictured() {
        let skip = Skip {
            newline: Newline::CRLF,
            line_breaks: false,
            ignore: &[],
        };
        assert_eq!(run("\r\n", EncodingFamily::Dos, &skip), "♪◙");
        assert_eq!(run("\r\n", EncodingFamily::Unicode, &skip), "␍␊");
    }

    #[test]
    fn ignored_code_points_survive() {
        let skip = Skip {
            newline: Newline::NONE,
            line_breaks: true,
            ignore: &['\t', '\u{7}'],
        };
        assert_eq!(run("\t\u{7}\u{8}", EncodingFamily::Windows, &skip), "\t\u{7}␈");
    }

    #[test]
    fn ebcdic_named_shared_and_blanked() {
        let skip = Skip::default();
        assert_eq!(run("\u{9}\u{85}\u{1B}", EncodingFamily::Ebcdic, &skip), "␉␤␛");
        assert_eq!(run("\u{1}\u{1F}", EncodingFamily::Ebcdic, &skip), "␁␟");
        assert_eq!(run("\u{4}\u{9C}\u{80}", EncodingFamily::Ebcdic, &skip), "   ");
        assert_eq!(run("\u{96}A", EncodingFamily::Ebcdic, &skip), "␄A");
    }

    #[test]
    fn latin_blanks_controls() {
        let skip = Skip::default();
        assert_eq!(run("a\u{1}\u{7F}\u{85}\u{FFFD}é", EncodingFamily::Latin, &skip), "a    é");
    }

    #[test]
    fn latin_controls_pictures_first() {
        let skip = Skip::default();
        assert_eq!(run("ring a \u{7}", EncodingFamily::LatinControls, &skip), "ring a ␇");
        assert_eq!(run("\u{FFFD}", EncodingFamily::LatinControls, &skip), " ");
    }

    #[test]
    fn latin_controls_blank_delete_and_c1() {
        let skip = Skip::default();
        assert_eq!(run("a\u{7F}\u{85}\u{9F}b", EncodingFamily::LatinControls, &skip), "a   b");
    }

    #[test]
    fn koi8_blanks_c0_and_delete() {
        let skip = Skip::default();
        assert_eq!(run("У\u{1}\u{7F}", EncodingFamily::Koi8, &skip), "У  ");
    }

    #[test]
    fn macintosh_modifier_keys() {
        let skip = Skip::default();
        assert_eq!(
            run("\u{11} command + \u{12} shift.", EncodingFamily::Macintosh, &skip),
            "⌘ command + ⇧ shift."
        );
        assert_eq!(run("\u{13}\u{14}\u{7F}\u{1}", EncodingFamily::Macintosh, &skip), "⌥⌃⌂␁");
    }

    #[test]
    fn windows_house_and_blank() {
        let skip = Skip::default();
        assert_eq!(run("\u{7F}\u{FFFD}\u{1B}", EncodingFamily::Windows, &skip), "⌂ ␛");
    }

    #[test]
    fn generic_pictures_c0_only() {
        let skip = Skip::default();
        assert_eq!(run("\u{A}\u{1B}", EncodingFamily::Default, &skip), "␊␛");
        assert_eq!(run("\u{8A}\u{9B}\u{7F}", EncodingFamily::Unicode, &skip), "\u{8A}\u{9B}\u{7F}");
    }

    #[test]
    fn every_family_has_a_strategy() {
        for (family, _) in &STRATEGIES {
            let _ = strategy(*family).picture('a');
        }
        assert_eq!(STRATEGIES.len(), 9);
    }
}
