// Configured word lists: the substitute vocabulary and the ignore list.
//
// Both are built once at startup from plain word lists and never mutated.
//
// A `SubstituteEntry` pairs a donor word with the rhyming part of its first
// pronunciation. Words the dictionary does not know, or whose first
// pronunciation has no stressed vowel, cannot donate a syllable; they are
// dropped with a warning when the vocabulary is built rather than failing
// later on every phrase.

use std::collections::HashSet;

use morelike_phonetics::{PhoneticResolver, Phoneme, Pronunciation};

/// A donor word and the phonetic fingerprint it rhymes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstituteEntry {
    word: String,
    rhyming_part: Vec<Phoneme>,
}

impl SubstituteEntry {
    /// Build an entry from `word`'s first pronunciation.
    ///
    /// Returns `None` for unknown words and for pronunciations without a
    /// stressed vowel.
    pub fn from_word<P>(word: &str, resolver: &P) -> Option<Self>
    where
        P: PhoneticResolver + ?Sized,
    {
        let first = resolver.pronunciations(word).first()?;
        let rhyming_part = first.rhyming_part()?.to_vec();
        Some(Self {
            word: word.to_string(),
            rhyming_part,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn rhyming_part(&self) -> &[Phoneme] {
        &self.rhyming_part
    }

    /// The rhyming part up to and including its last vowel.
    ///
    /// For a one-syllable rhyme like `AE1 T` this is just the stressed
    /// vowel `AE1`; the trailing consonants are dropped.
    pub fn vowel_anchor(&self) -> &[Phoneme] {
        match self.rhyming_part.iter().rposition(Phoneme::is_vowel) {
            Some(last) => &self.rhyming_part[..=last],
            None => &[],
        }
    }

    /// Whether this entry's rhyme occurs inside `pronunciation`.
    pub fn rhymes_within(&self, pronunciation: &Pronunciation) -> bool {
        pronunciation.contains_sequence(&self.rhyming_part)
    }
}

/// The set of donor words, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct SubstituteVocabulary {
    entries: Vec<SubstituteEntry>,
}

impl SubstituteVocabulary {
    /// Resolve every word once. Duplicates keep their first position.
    pub fn build<I, P>(words: I, resolver: &P) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        P: PhoneticResolver + ?Sized,
    {
        let mut entries: Vec<SubstituteEntry> = Vec::new();
        for word in words {
            let word = word.as_ref();
            if entries.iter().any(|e| e.word == word) {
                continue;
            }
            match SubstituteEntry::from_word(word, resolver) {
                Some(entry) => entries.push(entry),
                None => tracing::warn!(word, "substitute word has no usable pronunciation, skipping"),
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[SubstituteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose rhyming part occurs within `pronunciation`.
    pub fn matching(&self, pronunciation: &Pronunciation) -> Vec<&SubstituteEntry> {
        self.entries
            .iter()
            .filter(|e| e.rhymes_within(pronunciation))
            .collect()
    }
}

/// Words passed through untouched, compared verbatim.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    words: HashSet<String>,
}

impl IgnoreList {
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
