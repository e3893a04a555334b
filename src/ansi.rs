//! ANSI escape recovery.
//!
//! Substitution pictures ESC like any other control, which breaks the
//! `ESC [` Control Sequence Introducer that ANSI art depends on. This pass
//! puts the ESC back wherever a pictured escape is followed by `[`.

use std::sync::LazyLock;

use regex::Regex;

/// Escape control, 0x1B.
pub const ESC: char = '\u{001B}';

/// Pictures that ESC may have become: ← on the IBM PC, ␛ elsewhere.
const PICTURED_ESC: [char; 2] = ['\u{2190}', '\u{241B}'];

/// Control Sequence Introducer followed by its parameters and final byte.
#[allow(clippy::expect_used)]
static CSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("valid regex")
});

/// Restore ESC in front of every `[` that follows a pictured escape.
///
/// Only the first code point of each pair changes, so the length is kept
/// and a second pass finds nothing to do.
///
/// ```
/// use retrotext::ansi::normalize;
///
/// let mut runes: Vec<char> = "←[0m␛[1m".chars().collect();
/// normalize(&mut runes);
/// assert_eq!(runes.iter().collect::<String>(), "\x1B[0m\x1B[1m");
/// ```
pub fn normalize(runes: &mut [char]) {
    let mut restored = 0usize;
    for i in 0..runes.len().saturating_sub(1) {
        if runes[i + 1] == '[' && PICTURED_ESC.contains(&runes[i]) {
            runes[i] = ESC;
            restored += 1;
        }
    }
    tracing::trace!(restored, "ansi escapes restored");
}

/// Count the complete control sequences in the text.
///
/// ```
/// use retrotext::ansi::count_sequences;
///
/// assert_eq!(count_sequences("\x1B[0m\x1B[1;33mhi\x1B["), 2);
/// ```
#[must_use]
pub fn count_sequences(text: &str) -> usize {
    CSI_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(s: &str) -> String {
        let mut runes: Vec<char> = s.chars().collect();
        normalize(&mut runes);
        runes.into_iter().collect()
    }

    #[test]
    fn restores_both_pictures() {
        assert_eq!(normalized("←[0m"), "\x1B[0m");
        assert_eq!(normalized("␛[0m"), "\x1B[0m");
    }

    #[test]
    fn lone_pictures_are_kept() {
        assert_eq!(normalized("←"), "←");
        assert_eq!(normalized("␛ ["), "␛ [");
        assert_eq!(normalized("[←"), "[←");
    }

    #[test]
    fn idempotent() {
        let once = normalized("a←[1;31mb␛[0m←");
        assert_eq!(normalized(&once), once);
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(normalized(""), "");
        assert_eq!(normalized("["), "[");
    }

    #[test]
    fn counts_sequences() {
        assert_eq!(count_sequences("plain"), 0);
        assert_eq!(count_sequences("\x1B[2J\x1B[1;1H\x1B[0;1;33;44m"), 3);
        assert_eq!(count_sequences("←[0m"), 0);
    }
}
