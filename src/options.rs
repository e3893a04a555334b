//! Configuration options for conversion.
//!
//! The `Options` struct names the source encoding and the controls and
//! swaps to apply, and sets optional line wrapping.

use std::fmt;
use std::str::FromStr;

use crate::swap::Swap;

/// A control code the caller wants kept as is rather than pictured.
///
/// [`Control::Eof`] is the odd one out: it asks for the DOS end-of-file
/// marker to be obeyed, truncating the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Obey the Ctrl-Z end-of-file marker.
    Eof,
    /// Horizontal tab, 0x09.
    Tab,
    /// Bell, 0x07.
    Bell,
    /// Carriage return, 0x0D.
    CarriageReturn,
    /// Line feed, 0x0A.
    LineFeed,
    /// Backspace, 0x08.
    Backspace,
    /// Delete, 0x7F.
    Delete,
    /// Escape, 0x1B.
    Escape,
    /// Form feed, 0x0C.
    FormFeed,
    /// Vertical tab, 0x0B.
    VerticalTab,
}

impl Control {
    /// Parse a control name or one of its abbreviations, ignoring case and padding.
    ///
    /// ```
    /// use retrotext::Control;
    ///
    /// assert_eq!(Control::from_name("ESC"), Some(Control::Escape));
    /// assert_eq!(Control::from_name("="), Some(Control::Eof));
    /// assert_eq!(Control::from_name("nul"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let control = match name.trim().to_lowercase().as_str() {
            "eof" | "=" => Self::Eof,
            "tab" | "ht" | "t" => Self::Tab,
            "bell" | "bel" | "b" => Self::Bell,
            "cr" | "c" => Self::CarriageReturn,
            "lf" | "l" => Self::LineFeed,
            "backspace" | "bs" => Self::Backspace,
            "del" | "d" => Self::Delete,
            "esc" | "e" => Self::Escape,
            "formfeed" | "ff" | "f" => Self::FormFeed,
            "vtab" | "vt" | "v" => Self::VerticalTab,
            _ => return None,
        };
        Some(control)
    }

    /// Short name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "eof",
            Self::Tab => "tab",
            Self::Bell => "bell",
            Self::CarriageReturn => "cr",
            Self::LineFeed => "lf",
            Self::Backspace => "bs",
            Self::Delete => "del",
            Self::Escape => "esc",
            Self::FormFeed => "ff",
            Self::VerticalTab => "vt",
        }
    }

    /// The code point left untouched, `None` for [`Control::Eof`].
    #[must_use]
    pub fn code_point(self) -> Option<char> {
        match self {
            Self::Eof => None,
            Self::Tab => Some('\t'),
            Self::Bell => Some('\u{0007}'),
            Self::CarriageReturn => Some('\r'),
            Self::LineFeed => Some('\n'),
            Self::Backspace => Some('\u{0008}'),
            Self::Delete => Some('\u{007F}'),
            Self::Escape => Some('\u{001B}'),
            Self::FormFeed => Some('\u{000C}'),
            Self::VerticalTab => Some('\u{000B}'),
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| s.to_string())
    }
}

/// Parse control names, logging and returning the ones not recognised.
///
/// Unknown names are warnings, never errors.
#[must_use]
pub fn parse_controls<S: AsRef<str>>(names: &[S]) -> (Vec<Control>, Vec<String>) {
    let mut controls = Vec::new();
    let mut unknown = Vec::new();
    for name in names.iter().map(AsRef::as_ref) {
        match Control::from_name(name) {
            Some(control) if !controls.contains(&control) => controls.push(control),
            Some(_) => {}
            None => unknown.push(name.trim().to_string()),
        }
    }
    if !unknown.is_empty() {
        tracing::warn!(unknown = %unknown.join(","), "unsupported control values");
    }
    (controls, unknown)
}

/// Configuration options for conversion.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use retrotext::{Control, Options, Swap};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     encoding: "cp437".to_string(),
///     controls: vec![Control::Eof, Control::Tab],
///     swaps: vec![Swap::House],
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Name of the source encoding, resolved by [`crate::encoding::resolve`].
    ///
    /// Default: `""` (UTF-8)
    pub encoding: String,

    /// Controls to keep as they are instead of picturing them.
    ///
    /// Default: empty
    pub controls: Vec<Control>,

    /// Character swaps applied after conversion.
    ///
    /// Ignored by ANSI conversion, which keeps the art untouched.
    ///
    /// Default: `[Swap::Null, Swap::Bar]`
    pub swaps: Vec<Swap>,

    /// Wrap the output every `max_width` code points. `0` disables wrapping.
    ///
    /// Default: `0`
    pub max_width: usize,

    /// Keep the detected newline as is.
    ///
    /// When false the terminator is pictured like any other control.
    /// Character table conversion always behaves as if this were false.
    ///
    /// Default: `true`
    pub line_breaks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            encoding: String::new(),
            controls: Vec::new(),
            swaps: vec![Swap::Null, Swap::Bar],
            max_width: 0,
            line_breaks: true,
        }
    }
}

impl Options {
    /// Whether the end-of-file marker should be obeyed.
    #[must_use]
    pub fn obeys_eof(&self) -> bool {
        self.controls.contains(&Control::Eof)
    }

    /// Code points named by [`Options::controls`].
    #[must_use]
    pub fn ignored(&self) -> Vec<char> {
        self.controls.iter().filter_map(|c| c.code_point()).collect()
    }
}
