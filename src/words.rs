//! The candidate word list, deduplicated and interned.
//!
//! Domains and assignments refer to words by [`WordId`]; the list stores each
//! distinct word once, together with its characters split out so overlap
//! positions index in O(1) and lengths count characters rather than bytes.
//!
//! The list performs no case normalization: comparisons everywhere are exact,
//! so the caller supplies words in one consistent case.

use std::collections::HashMap;
use std::fmt;

use crate::types::WordId;

struct Word {
    text: String,
    chars: Box<[char]>,
}

/// An immutable, deduplicated word collection.
///
/// Duplicates are dropped on intake (first occurrence wins), and ids follow
/// insertion order, so iteration over a [`WordList`] is deterministic.
pub struct WordList {
    entries: Vec<Word>,
    ids: HashMap<String, WordId>,
}

impl WordList {
    /// Builds a word list from any string collection, dropping duplicates.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<Word> = Vec::new();
        let mut ids = HashMap::new();
        for word in words {
            let text: String = word.into();
            if ids.contains_key(&text) {
                continue;
            }
            let id = WordId::new(entries.len() as u32);
            let chars: Box<[char]> = text.chars().collect();
            ids.insert(text.clone(), id);
            entries.push(Word { text, chars });
        }
        WordList { entries, ids }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text of a word.
    pub fn text(&self, id: WordId) -> &str {
        &self.entries[id.index()].text
    }

    /// The length of a word in characters.
    pub fn length(&self, id: WordId) -> usize {
        self.entries[id.index()].chars.len()
    }

    /// The character of a word at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of the word. Overlap positions are
    /// always in range once domains are node-consistent.
    pub fn char_at(&self, id: WordId, pos: usize) -> char {
        self.entries[id.index()].chars[pos]
    }

    /// Looks up the id of a word by exact text.
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// All word ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = WordId> {
        (0..self.entries.len() as u32).map(WordId::new)
    }
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList").field("words", &self.entries.len()).finish()
    }
}
