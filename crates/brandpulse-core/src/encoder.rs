//! Word-index vocabulary and the text → token sequence encoder.
//!
//! The classifier was trained on the Keras IMDB corpus, so every input must be
//! encoded with the exact same conventions or predictions drift silently.
//!
//! # Index conventions
//!
//! - 0: padding
//! - 1: start-of-sequence (reserved by the corpus, never emitted)
//! - 2: unknown / out-of-vocabulary
//! - rank r from the word index becomes r + 3
//! - anything at or above the trained vocabulary size (10 000) collapses to 2

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::VocabularyError;

/// Padding index used to left-fill short sequences.
pub const PAD_INDEX: u32 = 0;
/// Out-of-vocabulary index.
pub const OOV_INDEX: u32 = 2;
/// Offset applied to every rank in the word index.
pub const INDEX_OFFSET: u32 = 3;
/// Number of distinct indices the model was trained with.
pub const VOCAB_SIZE: u32 = 10_000;
/// Fixed length of every encoded sequence.
pub const SEQUENCE_LEN: usize = 200;

/// Word → rank table matching the training-time vocabulary.
///
/// Immutable once built. Ranks are stored raw; [`Vocabulary::index_of`]
/// applies the offset and clamp.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ranks: HashMap<String, u32>,
}

/// A token sequence of exactly [`SEQUENCE_LEN`] indices, each below [`VOCAB_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSequence(Vec<u32>);

impl EncodedSequence {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-padding positions.
    pub fn token_count(&self) -> usize {
        self.0.iter().filter(|&&i| i != PAD_INDEX).count()
    }
}

impl Vocabulary {
    /// Build a vocabulary from a JSON object of `{"word": rank, ...}`.
    ///
    /// This is the format of the Keras `imdb_word_index.json` file.
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let ranks: HashMap<String, u32> = serde_json::from_str(json)?;
        Ok(Self { ranks })
    }

    /// Load the word index JSON from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab = Self::from_json_str(&json)?;
        info!(words = vocab.len(), path = %path.display(), "loaded vocabulary");
        Ok(vocab)
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Raw rank of a word as stored in the word index.
    pub fn rank(&self, word: &str) -> Option<u32> {
        self.ranks.get(word).copied()
    }

    /// Model index for a normalized word: rank + 3, clamped to [`OOV_INDEX`].
    ///
    /// Absent words map straight to [`OOV_INDEX`].
    pub fn index_of(&self, word: &str) -> u32 {
        match self.rank(word) {
            Some(rank) => match rank.checked_add(INDEX_OFFSET) {
                Some(idx) if idx < VOCAB_SIZE => idx,
                _ => OOV_INDEX,
            },
            None => OOV_INDEX,
        }
    }

    /// Encode free text into a fixed-length sequence.
    ///
    /// Never fails: unknown words become [`OOV_INDEX`], and blank or
    /// punctuation-only text yields all padding.
    ///
    /// # Algorithm
    ///
    /// 1. [`tokenize`] the text
    /// 2. Map each word through [`Vocabulary::index_of`]
    /// 3. Keep the trailing [`SEQUENCE_LEN`] indices
    /// 4. Left-pad with [`PAD_INDEX`] up to [`SEQUENCE_LEN`]
    pub fn encode(&self, text: &str) -> EncodedSequence {
        let indices: Vec<u32> = tokenize(text)
            .iter()
            .map(|word| self.index_of(word))
            .collect();
        EncodedSequence(pad_sequence(&indices))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        Self {
            ranks: iter.into_iter().map(|(w, r)| (w.into(), r)).collect(),
        }
    }
}

/// Word separator as the training-time tokenizer saw it.
///
/// Unicode whitespace plus the ASCII information separators U+001C..U+001F.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True when the text holds nothing but separators.
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(is_separator).is_empty()
}

/// Lowercase, strip everything but ASCII alphanumerics and separators, split on separators.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || is_separator(c))
        .collect();
    cleaned
        .split(is_separator)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pre-pad / pre-truncate to exactly [`SEQUENCE_LEN`].
fn pad_sequence(indices: &[u32]) -> Vec<u32> {
    let tail = &indices[indices.len().saturating_sub(SEQUENCE_LEN)..];
    let mut out = vec![PAD_INDEX; SEQUENCE_LEN - tail.len()];
    out.extend_from_slice(tail);
    out
}
