//! Random-name heuristic for spotting junk files.
//!
//! A basename is classified as spam when its stem is longer than
//! [`MIN_SPAM_STEM_LEN`] characters, consists only of ASCII letters and
//! digits, and contains none of the [`SPAM_KEYWORDS`]. Names like
//! `fdasmulvioiua.tmp` match; `raport2024final.pdf` and `my-notes.txt`
//! do not.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Stems must be strictly longer than this to be considered spam.
pub const MIN_SPAM_STEM_LEN: usize = 8;

/// Substrings that mark a long alphanumeric stem as a real file.
pub const SPAM_KEYWORDS: [&str; 8] = [
    "projekt", "raport", "dokument", "zdjecie", "photo", "plik", "test", "data",
];

/// Result of classifying a basename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Classification {
    /// The name looks like a regular, meaningful file name.
    NotSpam,
    /// The name looks randomly generated.
    Spam,
}

impl Classification {
    /// Check if this is the spam classification.
    pub fn is_spam(self) -> bool {
        matches!(self, Self::Spam)
    }
}

/// Return the stem of `filename`: everything before the last dot.
///
/// Leading dots belong to the stem, so `.bashrc` is its own stem while
/// `archive.tar.gz` has the stem `archive.tar`.
pub fn stem(filename: &str) -> &str {
    let body_start = filename.len() - filename.trim_start_matches('.').len();
    match filename[body_start..].rfind('.') {
        Some(dot) => &filename[..body_start + dot],
        None => filename,
    }
}

/// Classify a basename as spam or not.
pub fn classify(filename: &str) -> Classification {
    let stem = stem(filename);

    // All-ASCII at this point, so byte length equals character count.
    let looks_random = stem.bytes().all(|b| b.is_ascii_alphanumeric())
        && stem.len() > MIN_SPAM_STEM_LEN;
    if !looks_random {
        return Classification::NotSpam;
    }

    let lowered = stem.to_ascii_lowercase();
    if SPAM_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        Classification::NotSpam
    } else {
        Classification::Spam
    }
}
