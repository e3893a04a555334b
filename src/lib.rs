//! # retrotext
//!
//! Legacy text to Unicode conversion.
//!
//! This library decodes DOS and OEM code pages, EBCDIC, ISO-8859, KOI8,
//! Macintosh Roman, Windows-125x and Shift-JIS text into Unicode, replacing
//! unprintable control codes with their picture glyphs so the text looks
//! the way it did on the original machine. ANSI art keeps its escape
//! sequences. It also reads the SAUCE metadata record appended to many
//! art and text files.
//!
//! ## Quick Start
//!
//! ```rust
//! use retrotext::{convert_with_options, Mode, Options};
//!
//! let options = Options {
//!     encoding: "cp437".to_string(),
//!     ..Options::default()
//! };
//! let result = convert_with_options(b"\x01 h\x82llo \xdb\xdb\r\n", Mode::Text, &options)?;
//! assert_eq!(result.text(), "☺ héllo ██\r\n");
//! println!("newline: {}", result.newline);
//! # Ok::<(), retrotext::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Encoding resolution**: IANA names, WHATWG labels and everyday aliases
//!   such as `cp437`, `oem-850`, `latin1` or `mac`
//! - **Control pictures**: per code page family, so CP437 0x01 becomes ☺
//!   while ISO-8859-1 controls are blanked
//! - **ANSI art**: escapes pictured by substitution are restored
//! - **SAUCE**: title, author, group, date, type information and comments

mod error;
mod options;
mod result;

/// Encoding names, aliases and families.
pub mod encoding;

/// Bytes to code points and back.
pub mod decode;

/// Newline detection, end-of-file truncation and text counters.
pub mod newline;

/// Control code picture substitution.
pub mod glyph;

/// ANSI escape recovery after substitution.
pub mod ansi;

/// Optional character swaps.
pub mod swap;

/// Staged per-buffer conversion.
pub mod session;

/// Converting many buffers on scoped worker threads.
pub mod batch;

/// SAUCE metadata records.
pub mod sauce;

// Public API - re-exports
pub use encoding::Charset;
pub use error::{Error, Result};
pub use newline::Newline;
pub use options::{parse_controls, Control, Options};
pub use result::Conversion;
pub use sauce::Record;
pub use session::{Mode, Session, Stage};
pub use swap::Swap;

/// Converts UTF-8 or ASCII text using default options.
///
/// # Example
///
/// ```rust
/// use retrotext::convert;
///
/// let result = convert(b"bell\x07")?;
/// assert_eq!(result.text(), "bell␇");
/// # Ok::<(), retrotext::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn convert(bytes: &[u8]) -> Result<Conversion> {
    convert_with_options(bytes, Mode::Text, &Options::default())
}

/// Converts text in the given mode with custom options.
///
/// # Arguments
///
/// * `bytes` - The raw text
/// * `mode` - How controls, escapes and the end-of-file marker are treated
/// * `options` - Encoding, ignored controls, swaps and wrapping
///
/// # Returns
///
/// Returns `Ok(Conversion)` holding the code points, the charset used, the
/// detected newline and any SAUCE record. Returns an `Error` for an unknown encoding name or bytes
/// that are malformed in a multi-byte encoding.
///
/// # Example
///
/// ```rust
/// use retrotext::{convert_with_options, Control, Mode, Options};
///
/// let options = Options {
///     encoding: "cp437".to_string(),
///     controls: vec![Control::Eof],
///     ..Options::default()
/// };
/// let result = convert_with_options(b"Hello\x1Aworld", Mode::Dump, &options)?;
/// assert_eq!(result.text(), "Hello");
/// # Ok::<(), retrotext::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn convert_with_options(bytes: &[u8], mode: Mode, options: &Options) -> Result<Conversion> {
    session::convert(bytes, mode, options)
}

/// Converts plain text, stopping at the end-of-file marker.
#[allow(clippy::missing_errors_doc)]
pub fn text(bytes: &[u8], options: &Options) -> Result<String> {
    convert_with_options(bytes, Mode::Text, options).map(|c| c.text())
}

/// Converts ANSI art, keeping its escape sequences.
///
/// Swaps are never applied to ANSI art.
///
/// ```rust
/// use retrotext::{ansi, Options};
///
/// let options = Options { encoding: "cp437".into(), ..Options::default() };
/// assert_eq!(ansi(b"\x1b[1;33m\xdb", &options)?, "\x1b[1;33m█");
/// # Ok::<(), retrotext::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn ansi(bytes: &[u8], options: &Options) -> Result<String> {
    convert_with_options(bytes, Mode::Ansi, options).map(|c| c.text())
}

/// Converts text past any end-of-file marker, unless `eof` is among the controls.
#[allow(clippy::missing_errors_doc)]
pub fn dump(bytes: &[u8], options: &Options) -> Result<String> {
    convert_with_options(bytes, Mode::Dump, options).map(|c| c.text())
}

/// Converts a character table, picturing every control including newlines.
///
/// ```rust
/// use retrotext::{chars, Options};
///
/// let options = Options { encoding: "cp437".into(), ..Options::default() };
/// assert_eq!(chars(b"\x01\r\n", &options)?, "☺♪◙");
/// # Ok::<(), retrotext::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn chars(bytes: &[u8], options: &Options) -> Result<String> {
    convert_with_options(bytes, Mode::Chars, options).map(|c| c.text())
}
