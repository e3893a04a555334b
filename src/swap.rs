//! Optional single character replacements applied after conversion.

use std::fmt;
use std::str::FromStr;

/// A character swap requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swap {
    /// NUL and its picture ␀ become a space.
    Null,
    /// The broken bar ¦ drawn for 0x7C becomes a vertical line |.
    Bar,
    /// The house ⌂ becomes a Greek delta Δ.
    House,
    /// The integral extension ⎮ becomes a box drawing line │.
    Pipe,
    /// The square root √ becomes a check mark ✓.
    Root,
    /// The open box ␣ becomes a space.
    Space,
}

impl Swap {
    /// Every swap.
    pub const ALL: [Swap; 6] = [
        Self::Null,
        Self::Bar,
        Self::House,
        Self::Pipe,
        Self::Root,
        Self::Space,
    ];

    /// Full name of the swap.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bar => "bar",
            Self::House => "house",
            Self::Pipe => "pipe",
            Self::Root => "root",
            Self::Space => "space",
        }
    }

    /// Parse a full name or its single letter, ignoring case and padding.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "null" | "n" => Some(Self::Null),
            "bar" | "b" => Some(Self::Bar),
            "house" | "h" => Some(Self::House),
            "pipe" | "p" => Some(Self::Pipe),
            "root" | "r" => Some(Self::Root),
            "space" | "s" => Some(Self::Space),
            _ => None,
        }
    }

    /// The replacement for `r`, if this swap touches it.
    fn replace(self, r: char) -> Option<char> {
        match (self, r) {
            (Self::Null, '\u{0000}' | '\u{2400}') | (Self::Space, '\u{2423}') => Some(' '),
            (Self::Bar, '\u{00A6}') => Some('|'),
            (Self::House, '\u{2302}') => Some('\u{0394}'),
            (Self::Pipe, '\u{23AE}') => Some('\u{2502}'),
            (Self::Root, '\u{221A}') => Some('\u{2713}'),
            _ => None,
        }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Swap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| s.to_string())
    }
}

/// Parse swap names, logging and returning the ones not recognised.
#[must_use]
pub fn parse<S: AsRef<str>>(names: &[S]) -> (Vec<Swap>, Vec<String>) {
    let mut swaps = Vec::new();
    let mut unknown = Vec::new();
    for name in names.iter().map(AsRef::as_ref) {
        match Swap::from_name(name) {
            Some(swap) if !swaps.contains(&swap) => swaps.push(swap),
            Some(_) => {}
            None => unknown.push(name.trim().to_string()),
        }
    }
    if !unknown.is_empty() {
        tracing::warn!(unknown = %unknown.join(","), "unsupported swap values");
    }
    (swaps, unknown)
}

/// Apply the swaps in place. The number of code points never changes.
pub fn apply(runes: &mut [char], swaps: &[Swap]) {
    if swaps.is_empty() {
        return;
    }
    for r in runes.iter_mut() {
        if let Some(c) = swaps.iter().find_map(|swap| swap.replace(*r)) {
            *r = c;
        }
    }
}
