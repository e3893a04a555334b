//! Result type for conversion output.

use crate::encoding::Charset;
use crate::newline::{self, Newline};
use crate::sauce::Record;

/// Output of converting one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// Converted code points.
    pub runes: Vec<char>,

    /// Charset the bytes were decoded from.
    pub charset: Charset,

    /// Newline detected in the decoded text.
    pub newline: Newline,

    /// SAUCE record found at the end of the raw bytes.
    pub sauce: Option<Record>,
}

impl Conversion {
    /// The code points as a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.runes.iter().collect()
    }

    /// Number of lines, using the detected newline.
    #[must_use]
    pub fn lines(&self) -> usize {
        newline::lines(&self.runes, self.newline)
    }

    /// Width of the widest line.
    #[must_use]
    pub fn columns(&self) -> usize {
        newline::columns(&self.runes, self.newline)
    }
}
