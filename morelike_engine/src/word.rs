// Single-word transformation: swap one syllable for a rhyming donor word.
//
// Given a token, the transformer
// 1. passes ignored words and anything containing whitespace through as-is,
// 2. strips non-alphanumeric characters (punctuation is dropped, not kept
//    in place),
// 3. takes the first pronunciation of the stripped word,
// 4. splits the spelling into syllables (monosyllables are not split) and
//    requires the piece count to equal the vowel count, so that vowel n can
//    be trusted to live in piece n,
// 5. collects the donors whose rhyming part appears inside the
//    pronunciation and lets the random source pick one,
// 6. finds the first vowel of the word equal to the donor's vowel anchor
//    and replaces that syllable with the donor word, carrying over the
//    syllable's trailing consonants when the donor ends in a vowel letter.
//
// Every step that cannot proceed degrades to returning the stripped word.
// There is no error path: a token that cannot be transformed comes back
// unchanged and the rest of the phrase is unaffected.
//
// The transformer only borrows its resolver and syllabifier and takes the
// random source per call, so one instance can be shared freely.
//
// Re-applying the transformation to its own output is not idempotent; the
// new spelling may resolve to a different pronunciation or none at all.

use morelike_phonetics::{Phoneme, PhoneticResolver, Pronunciation, Syllabifier};
use morelike_prng::RandomSource;

use crate::vocabulary::{IgnoreList, SubstituteVocabulary};

/// Letters treated as vowels by the ending-extension rule. Matching is
/// case-sensitive: `A` is not a vowel letter here.
const VOWEL_LETTERS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Borrowing view over the two leaf capabilities.
#[derive(Debug)]
pub struct WordTransformer<'a, P: ?Sized, S: ?Sized> {
    resolver: &'a P,
    syllabifier: &'a S,
}

impl<P: ?Sized, S: ?Sized> Clone for WordTransformer<'_, P, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized, S: ?Sized> Copy for WordTransformer<'_, P, S> {}

impl<'a, P, S> WordTransformer<'a, P, S>
where
    P: PhoneticResolver + ?Sized,
    S: Syllabifier + ?Sized,
{
    pub fn new(resolver: &'a P, syllabifier: &'a S) -> Self {
        Self {
            resolver,
            syllabifier,
        }
    }

    /// Transform one token. Never fails; see the module docs for when the
    /// token comes back unchanged.
    pub fn transform_word<R>(
        &self,
        word: &str,
        vocabulary: &SubstituteVocabulary,
        ignored: &IgnoreList,
        rng: &mut R,
    ) -> String
    where
        R: RandomSource + ?Sized,
    {
        if ignored.contains(word) || word.chars().any(char::is_whitespace) {
            return word.to_string();
        }

        let stripped = strip_non_alphanumeric(word);
        match self.substitute(&stripped, vocabulary, rng) {
            Some(transformed) => transformed,
            None => stripped,
        }
    }

    fn substitute<R>(
        &self,
        word: &str,
        vocabulary: &SubstituteVocabulary,
        rng: &mut R,
    ) -> Option<String>
    where
        R: RandomSource + ?Sized,
    {
        let pronunciation = self.resolver.pronunciations(word).first()?;
        let vowel_count = self.resolver.syllable_count(pronunciation);

        let mut syllables = if vowel_count == 1 {
            vec![word.to_string()]
        } else {
            self.syllabifier.syllabify(word)
        };
        if syllables.len() != vowel_count {
            tracing::debug!(
                word,
                vowels = vowel_count,
                pieces = syllables.len(),
                "spelling and pronunciation disagree on syllable count"
            );
            return None;
        }

        let candidates = vocabulary.matching(pronunciation);
        if candidates.is_empty() {
            return None;
        }
        let chosen = *candidates.get(rng.pick_index(candidates.len()))?;

        let Some(index) = vowel_position(pronunciation, chosen.vowel_anchor()) else {
            tracing::debug!(word, donor = chosen.word(), "donor anchor not found among vowels");
            return None;
        };

        let original = syllables.get(index)?;
        let mut replacement = chosen.word().to_string();
        if ends_with_vowel_letter(&replacement) {
            replacement.push_str(trailing_consonants(original));
        }
        tracing::debug!(word, donor = chosen.word(), index, "substituting syllable");
        *syllables.get_mut(index)? = replacement;

        Some(syllables.concat())
    }
}

/// Ordinal of the first vowel equal to `anchor`, which must be a single
/// phoneme to match. Multi-phoneme anchors never match.
fn vowel_position(pronunciation: &Pronunciation, anchor: &[Phoneme]) -> Option<usize> {
    pronunciation
        .vowels()
        .position(|vowel| std::slice::from_ref(vowel) == anchor)
}

/// Drop every character that is not a letter or digit.
pub fn strip_non_alphanumeric(word: &str) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn is_vowel_letter(c: char) -> bool {
    VOWEL_LETTERS.contains(&c)
}

fn ends_with_vowel_letter(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_vowel_letter)
}

/// The longest suffix of `syllable` containing no vowel letters.
fn trailing_consonants(syllable: &str) -> &str {
    match syllable.char_indices().rev().find(|&(_, c)| is_vowel_letter(c)) {
        Some((pos, c)) => &syllable[pos + c.len_utf8()..],
        None => syllable,
    }
}
