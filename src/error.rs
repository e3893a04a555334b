//! Error types for retrotext.
//!
//! This module defines the error types returned by conversion operations.
//! A missing SAUCE record or a malformed SAUCE date are not errors; see
//! [`crate::sauce`].

/// Error type for conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The encoding name did not match a registry name, a WHATWG label or an alias.
    #[error("unknown or unsupported code page name or alias: {name:?} → {normalized:?}")]
    UnresolvedEncoding {
        /// The name as supplied by the caller.
        name: String,
        /// The shortened and aliased form that was retried.
        normalized: String,
    },

    /// The input bytes are malformed for a variable-width encoding.
    #[error("{charset} decode failed: {reason}")]
    Decode {
        /// Canonical name of the encoding.
        charset: &'static str,
        /// What was wrong with the input.
        reason: String,
    },

    /// A character has no representation in the target code page.
    #[error("{charset} cannot encode {character:?} (U+{:04X})", u32::from(*character))]
    Encode {
        /// Canonical name of the encoding.
        charset: &'static str,
        /// The unmappable character.
        character: char,
    },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
