//! The conversion session.
//!
//! A [`Session`] owns one input buffer and carries it through the stages in
//! order: end-of-file truncation, decoding (with newline detection), control
//! substitution, ANSI escape recovery, then optional swaps and wrapping.
//! Running a stage out of order is a programming error and panics.

use std::sync::LazyLock;

use regex::Regex;

use crate::ansi;
use crate::decode;
use crate::encoding::{self, Charset};
use crate::error::Result;
use crate::glyph::{self, Skip};
use crate::newline::{self, Newline};
use crate::options::Options;
use crate::result::Conversion;
use crate::sauce::{self, Record};
use crate::swap::{self, Swap};

/// Carriage return and line feed pairs, and bare line feeds.
#[allow(clippy::expect_used)]
static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").expect("valid regex"));

/// The last stage a session completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Raw bytes only.
    Created,
    /// Bytes decoded and the newline detected.
    Decoded,
    /// Controls replaced by pictures.
    Substituted,
    /// ANSI escapes restored.
    Normalized,
}

/// How a buffer is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Plain or ANSI text. Obeys the end-of-file marker.
    #[default]
    Text,
    /// ANSI art. Obeys the end-of-file marker and skips swaps.
    Ansi,
    /// Text that continues past any end-of-file marker.
    Dump,
    /// A character table. Every control is pictured, newlines included, and
    /// ANSI escapes are left pictured.
    Chars,
}

impl Mode {
    fn obeys_eof(self, options: &Options) -> bool {
        match self {
            Self::Text | Self::Ansi => true,
            Self::Dump | Self::Chars => options.obeys_eof(),
        }
    }
}

/// Per-buffer conversion state.
#[derive(Debug, Clone)]
pub struct Session {
    source: Vec<u8>,
    charset: Charset,
    runes: Vec<char>,
    ignore: Vec<char>,
    newline: Newline,
    line_breaks: bool,
    stage: Stage,
    sauce: Option<Record>,
}

impl Session {
    /// Start a session over raw bytes in a resolved charset.
    #[must_use]
    pub fn new(source: impl Into<Vec<u8>>, charset: Charset) -> Self {
        let source = source.into();
        let sauce = sauce::parse(&source);
        Self {
            source,
            charset,
            runes: Vec::new(),
            ignore: Vec::new(),
            newline: Newline::NONE,
            line_breaks: true,
            stage: Stage::Created,
            sauce,
        }
    }

    /// Start a session, resolving the encoding named in `options` and taking
    /// its ignored controls and line break setting.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnresolvedEncoding`] for an unknown encoding name.
    pub fn with_options(source: impl Into<Vec<u8>>, options: &Options) -> Result<Self> {
        let charset = encoding::resolve(&options.encoding)?;
        let mut session = Self::new(source, charset);
        session.ignore = options.ignored();
        session.line_breaks = options.line_breaks;
        Ok(session)
    }

    /// Leave `r` untouched by substitution.
    pub fn ignore(&mut self, r: char) {
        if !self.ignore.contains(&r) {
            self.ignore.push(r);
        }
    }

    /// Keep or picture the detected newline.
    pub fn set_line_breaks(&mut self, keep: bool) {
        self.line_breaks = keep;
    }

    /// Truncate the raw bytes at the DOS end-of-file marker.
    ///
    /// # Panics
    ///
    /// Panics if the bytes were already decoded.
    pub fn trim_eof(&mut self) {
        assert!(
            self.stage == Stage::Created,
            "end-of-file truncation applies to raw bytes, session is at {:?}",
            self.stage
        );
        let len = newline::trim_eof(&self.source).len();
        self.source.truncate(len);
    }

    /// Decode the raw bytes and detect the newline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] for malformed multi-byte input.
    ///
    /// # Panics
    ///
    /// Panics if the session was already decoded.
    pub fn decode(&mut self) -> Result<()> {
        assert!(
            self.stage == Stage::Created,
            "decode runs once on raw bytes, session is at {:?}",
            self.stage
        );
        self.runes = decode::decode(&self.source, self.charset)?;
        self.newline = if self.charset.is_ebcdic() {
            Newline::detect_ebcdic(&self.runes)
        } else {
            Newline::detect(&self.runes)
        };
        self.stage = Stage::Decoded;
        tracing::debug!(
            charset = %self.charset,
            runes = self.runes.len(),
            newline = self.newline.name(),
            "decoded"
        );
        Ok(())
    }

    /// Replace control codes with pictures for the charset family.
    ///
    /// # Panics
    ///
    /// Panics unless the session was just decoded.
    pub fn substitute(&mut self) {
        assert!(
            self.stage == Stage::Decoded,
            "substitution needs decoded text, session is at {:?}",
            self.stage
        );
        let skip = Skip {
            newline: self.newline,
            line_breaks: self.line_breaks,
            ignore: &self.ignore,
        };
        glyph::substitute(&mut self.runes, self.charset.family(), &skip);
        self.stage = Stage::Substituted;
    }

    /// Restore the ESC of pictured ANSI escapes.
    ///
    /// # Panics
    ///
    /// Panics if substitution has not run.
    pub fn normalize_ansi(&mut self) {
        assert!(
            self.stage >= Stage::Substituted,
            "ANSI escapes are restored after substitution, session is at {:?}",
            self.stage
        );
        ansi::normalize(&mut self.runes);
        self.stage = Stage::Normalized;
    }

    /// Apply character swaps.
    ///
    /// # Panics
    ///
    /// Panics if substitution has not run.
    pub fn swap(&mut self, swaps: &[Swap]) {
        assert!(
            self.stage >= Stage::Substituted,
            "swaps apply to substituted text, session is at {:?}",
            self.stage
        );
        swap::apply(&mut self.runes, swaps);
    }

    /// Rewrap the text into rows of at most `max` code points.
    ///
    /// Newlines become spaces and tabs three spaces before the text is cut.
    /// A zero `max` leaves the text alone, and flattened text no wider than
    /// `max` is kept as a single row.
    ///
    /// # Panics
    ///
    /// Panics if substitution has not run.
    pub fn wrap(&mut self, max: usize) {
        assert!(
            self.stage >= Stage::Substituted,
            "wrapping applies to substituted text, session is at {:?}",
            self.stage
        );
        if max == 0 || self.runes.is_empty() {
            return;
        }
        let text: String = self.runes.iter().collect();
        let flat = NEWLINE_RE.replace_all(&text, " ").replace('\t', "   ");
        let flat: Vec<char> = flat.chars().collect();
        if newline::columns(&flat, self.newline) <= max {
            self.runes = flat;
            return;
        }
        let mut rows = Vec::with_capacity(flat.len() + flat.len() / max + 1);
        for row in flat.chunks(max) {
            rows.extend_from_slice(row);
            rows.push('\n');
        }
        self.runes = rows;
    }

    /// Raw bytes, possibly truncated.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// The charset of the raw bytes.
    #[must_use]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// The current code points.
    #[must_use]
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// The detected newline.
    #[must_use]
    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// SAUCE record of the raw bytes, read before any truncation.
    #[must_use]
    pub fn sauce(&self) -> Option<&Record> {
        self.sauce.as_ref()
    }

    /// The last completed stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Finish the session.
    #[must_use]
    pub fn into_conversion(self) -> Conversion {
        Conversion {
            runes: self.runes,
            charset: self.charset,
            newline: self.newline,
            sauce: self.sauce,
        }
    }
}

/// Run every stage of `mode` over `bytes`.
pub(crate) fn convert(bytes: &[u8], mode: Mode, options: &Options) -> Result<Conversion> {
    let charset = encoding::resolve(&options.encoding)?;
    convert_charset(bytes, charset, mode, options)
}

/// Run every stage of `mode` over `bytes` in an already resolved charset.
pub(crate) fn convert_charset(
    bytes: &[u8],
    charset: Charset,
    mode: Mode,
    options: &Options,
) -> Result<Conversion> {
    let mut session = Session::new(bytes, charset);
    if mode != Mode::Chars {
        session.ignore = options.ignored();
    }
    session.line_breaks = options.line_breaks && mode != Mode::Chars;
    tracing::debug!(?mode, %charset, len = bytes.len(), "converting");
    if mode.obeys_eof(options) {
        session.trim_eof();
    }
    session.decode()?;
    session.substitute();
    if mode != Mode::Chars {
        session.normalize_ansi();
    }
    if mode != Mode::Ansi {
        session.swap(&options.swaps);
    }
    session.wrap(options.max_width);
    Ok(session.into_conversion())
}
