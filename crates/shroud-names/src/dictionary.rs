//! User-supplied word lists.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use thiserror::Error;

use crate::NameFactory;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a dictionary file is split into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictionaryMode {
    /// Words are maximal runs of identifier characters. `#` starts a comment
    /// that runs to the end of the line.
    #[default]
    Identifiers,
    /// Every non-empty line is a word, unless it starts with `#`.
    Lines,
}

/// An ordered list of distinct words, cheap to clone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Arc<IndexSet<String>>,
}

impl Dictionary {
    /// Builds a dictionary from words in order, dropping repeats.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect();
        Self {
            words: Arc::new(words),
        }
    }

    pub fn parse(text: &str, mode: DictionaryMode) -> Self {
        match mode {
            DictionaryMode::Identifiers => Self::from_words(identifier_words(text)),
            DictionaryMode::Lines => Self::from_words(
                text.lines()
                    .filter(|line| !line.starts_with('#'))
                    .map(|line| line.trim_end_matches('\r')),
            ),
        }
    }

    pub fn load(path: &Path, mode: DictionaryMode) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text, mode))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifier_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for line in text.lines() {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        let mut start = None;
        for (offset, c) in line.char_indices() {
            match start {
                Some(_) if is_identifier_part(c) => {}
                Some(begin) => {
                    words.push(&line[begin..offset]);
                    start = is_identifier_start(c).then_some(offset);
                }
                None => start = is_identifier_start(c).then_some(offset),
            }
        }
        if let Some(begin) = start {
            words.push(&line[begin..]);
        }
    }
    words
}

/// Hands out dictionary words in order, then defers to a fallback factory
/// for good.
///
/// Fallback names that also occur in the dictionary are skipped, so the
/// sequence never repeats a word.
pub struct DictionaryNameFactory {
    dictionary: Dictionary,
    index: usize,
    fallback: Box<dyn NameFactory>,
}

impl DictionaryNameFactory {
    pub fn new(dictionary: Dictionary, fallback: Box<dyn NameFactory>) -> Self {
        Self {
            dictionary,
            index: 0,
            fallback,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl NameFactory for DictionaryNameFactory {
    fn reset(&mut self) {
        self.index = 0;
        self.fallback.reset();
    }

    fn next_name(&mut self) -> String {
        if let Some(word) = self.dictionary.get(self.index) {
            self.index += 1;
            return word.to_string();
        }
        loop {
            let name = self.fallback.next_name();
            if !self.dictionary.contains(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/dictionary_tests.rs"]
mod tests;
