//! Personal dictionary of words the spelling check must accept.

use std::{collections::HashSet, fs, path::PathBuf};

use tracing::debug;

use crate::{core::error::DictionaryError, utils::title_case};

/// Words accepted as correctly spelled, with their title-case forms.
#[derive(Debug, Clone, Default)]
pub struct PersonalDictionary {
    words: HashSet<String>,
}

impl PersonalDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every source (local path or http(s) URL, one word per line) and
    /// add the literal `words`.
    pub fn load(sources: &[String], words: &[String]) -> Result<Self, DictionaryError> {
        let mut dictionary = Self::new();
        for source in sources {
            let content = read_source(source)?;
            let before = dictionary.len();
            dictionary.extend(content.lines());
            debug!(%source, added = dictionary.len() - before, "loaded personal dictionary");
        }
        dictionary.extend(words.iter().map(String::as_str));
        Ok(dictionary)
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.words.insert(title_case(word));
        self.words.insert(word.to_string());
    }

    pub fn extend<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            self.insert(word);
        }
    }

    /// Case-sensitive lookup; leading and trailing whitespace is ignored.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.trim())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_source(source: &str) -> Result<String, DictionaryError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let http_error = |e: reqwest::Error| DictionaryError::Http {
            url: source.to_string(),
            source: e,
        };
        reqwest::blocking::get(source)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(http_error)
    } else {
        fs::read_to_string(source).map_err(|e| DictionaryError::Io {
            path: PathBuf::from(source),
            source: e,
        })
    }
}
