//! Positional feedback for a wrong guess.
//!
//! The diff is presentation-neutral: it says which characters to mark, and
//! the front end decides what marking looks like.

use super::SpanNumber;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// One rendered character and whether it is flagged as a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedChar {
    /// The character to draw.
    pub ch: char,
    /// True when this position differs between target and guess.
    pub mismatch: bool,
}

/// How to show a target next to a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffRendering {
    /// Same length: both strings carry the same positional mask.
    Aligned {
        /// Target characters, mismatches flagged.
        target: Vec<MarkedChar>,
        /// Guessed characters, mismatches flagged.
        guessed: Vec<MarkedChar>,
    },
    /// Different lengths: target struck through, then the guess unadorned.
    Fallback {
        /// Target text, drawn struck through.
        struck: String,
        /// Guessed text, drawn plainly.
        guessed: String,
    },
}

impl DiffRendering {
    /// Positions flagged as mismatched, empty for the fallback.
    pub fn mismatches(&self) -> Vec<usize> {
        match self {
            DiffRendering::Aligned { target, .. } => target
                .iter()
                .enumerate()
                .filter(|(_, c)| c.mismatch)
                .map(|(i, _)| i)
                .collect(),
            DiffRendering::Fallback { .. } => Vec::new(),
        }
    }
}

impl std::fmt::Display for DiffRendering {
    /// Plain-text form: mismatches in brackets, struck text between tildes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_marked(f: &mut std::fmt::Formatter<'_>, chars: &[MarkedChar]) -> std::fmt::Result {
            for c in chars {
                if c.mismatch {
                    write!(f, "[{}]", c.ch)?;
                } else {
                    write!(f, "{}", c.ch)?;
                }
            }
            Ok(())
        }

        match self {
            DiffRendering::Aligned { target, guessed } => {
                write_marked(f, target)?;
                write!(f, " | ")?;
                write_marked(f, guessed)
            }
            DiffRendering::Fallback { struck, guessed } => write!(f, "~{}~ {}", struck, guessed),
        }
    }
}

/// Computes the feedback rendering for `target` against `guessed`.
#[instrument(skip_all, fields(target = %target, guessed = %guessed))]
pub fn diff(target: &SpanNumber, guessed: &SpanNumber) -> DiffRendering {
    let target = target.to_string();
    let guessed = guessed.to_string();

    match mismatch_mask(&target, &guessed) {
        Some(mask) => DiffRendering::Aligned {
            target: mark(&target, &mask),
            guessed: mark(&guessed, &mask),
        },
        None => DiffRendering::Fallback {
            struck: target,
            guessed,
        },
    }
}

/// `mask[i]` is true where the strings differ; `None` if lengths differ.
pub fn mismatch_mask(a: &str, b: &str) -> Option<Vec<bool>> {
    if a.chars().count() != b.chars().count() {
        return None;
    }
    Some(a.chars().zip(b.chars()).map(|(x, y)| x != y).collect())
}

/// Applies `mask` to `text`.
///
/// A mask of the wrong length is logged and ignored: every character comes
/// back unmarked.
pub fn mark(text: &str, mask: &[bool]) -> Vec<MarkedChar> {
    let len = text.chars().count();
    if len != mask.len() {
        warn!(text, text_len = len, mask_len = mask.len(), "Mask length mismatch, rendering unmarked");
        return text
            .chars()
            .map(|ch| MarkedChar { ch, mismatch: false })
            .collect();
    }
    text.chars()
        .zip(mask)
        .map(|(ch, &mismatch)| MarkedChar { ch, mismatch })
        .collect()
}
