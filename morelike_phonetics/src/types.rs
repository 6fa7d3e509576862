// Core phonetic types: stress markers, phonemes, and pronunciations.
//
// The type hierarchy is:
// - `Stress` — the 0/1/2 digit ARPABET attaches to vowel phonemes
// - `Phoneme` — a symbol plus optional stress, parsed once from a token like
//   `AE1` or `T` at dictionary-load time
// - `Pronunciation` — an ordered phoneme sequence for one reading of a word
//
// Everything downstream (syllable counting, rhyme extraction, rhyme
// containment) works on these typed values rather than re-scanning strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PhoneticsError;

/// Lexical stress carried by a vowel phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    /// Digit `0`.
    Unstressed,
    /// Digit `1`.
    Primary,
    /// Digit `2`.
    Secondary,
}

impl Stress {
    /// Parse an ARPABET stress digit.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Stress::Unstressed),
            '1' => Some(Stress::Primary),
            '2' => Some(Stress::Secondary),
            _ => None,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Stress::Unstressed => '0',
            Stress::Primary => '1',
            Stress::Secondary => '2',
        }
    }

    /// Primary or secondary stress.
    pub fn is_stressed(self) -> bool {
        !matches!(self, Stress::Unstressed)
    }
}

/// One ARPABET phoneme. Vowels carry a stress marker, consonants do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phoneme {
    symbol: String,
    stress: Option<Stress>,
}

impl Phoneme {
    pub fn consonant(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            stress: None,
        }
    }

    pub fn vowel(symbol: impl Into<String>, stress: Stress) -> Self {
        Self {
            symbol: symbol.into(),
            stress: Some(stress),
        }
    }

    /// The bare symbol without its stress digit, e.g. `AE` for `AE1`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn stress(&self) -> Option<Stress> {
        self.stress
    }

    /// Vowels are exactly the phonemes that carry a stress marker.
    pub fn is_vowel(&self) -> bool {
        self.stress.is_some()
    }

    pub fn is_stressed(&self) -> bool {
        self.stress.is_some_and(Stress::is_stressed)
    }
}

impl FromStr for Phoneme {
    type Err = PhoneticsError;

    /// Parse a token such as `K`, `AE1` or `ER0`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || PhoneticsError::InvalidPhoneme {
            token: token.to_string(),
        };

        let (symbol, stress) = match token.chars().last() {
            Some(c) if c.is_ascii_digit() => {
                let stress = Stress::from_digit(c).ok_or_else(invalid)?;
                (&token[..token.len() - 1], Some(stress))
            }
            Some(_) => (token, None),
            None => return Err(invalid()),
        };

        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid());
        }

        Ok(Self {
            symbol: symbol.to_string(),
            stress,
        })
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;
        if let Some(stress) = self.stress {
            write!(f, "{}", stress.digit())?;
        }
        Ok(())
    }
}

/// One reading of a word as an ordered phoneme sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pronunciation(Vec<Phoneme>);

impl Pronunciation {
    pub fn new(phonemes: Vec<Phoneme>) -> Self {
        Self(phonemes)
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of vowel phonemes, one per syllable.
    pub fn syllable_count(&self) -> usize {
        self.vowels().count()
    }

    /// The vowel phonemes in order; the n-th vowel belongs to syllable n.
    pub fn vowels(&self) -> impl Iterator<Item = &Phoneme> {
        self.0.iter().filter(|p| p.is_vowel())
    }

    /// The suffix starting at the last vowel with primary or secondary stress.
    ///
    /// Returns `None` when no vowel is stressed; such a pronunciation cannot
    /// take part in rhyme matching.
    pub fn rhyming_part(&self) -> Option<&[Phoneme]> {
        let start = self.0.iter().rposition(Phoneme::is_stressed)?;
        Some(&self.0[start..])
    }

    /// Whether `needle` occurs as a contiguous run of phonemes.
    ///
    /// An empty needle never matches.
    pub fn contains_sequence(&self, needle: &[Phoneme]) -> bool {
        !needle.is_empty() && self.0.windows(needle.len()).any(|w| w == needle)
    }
}

impl FromStr for Pronunciation {
    type Err = PhoneticsError;

    /// Parse whitespace-separated phoneme tokens, e.g. `"K AE1 T"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse::<Phoneme>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phoneme) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{phoneme}")?;
        }
        Ok(())
    }
}
