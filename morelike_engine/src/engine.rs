// Owned engine: resolver, syllabifier, and word lists bundled together.
//
// `Engine` is what long-lived callers (the bot's message handler) hold. It
// is immutable after construction; every call takes the random source by
// `&mut` so the caller decides where randomness comes from. Tests pass a
// `ScriptedSource`, the bot a seeded `PunRng`.
//
// The free `morelike()` function is the one-shot convenience entry point:
// it builds an engine over the embedded default data and draws its
// randomness from `PunRng::from_entropy()`.

use morelike_phonetics::{
    HyphenationPatterns, PhoneticResolver, PronouncingDictionary, Syllabifier, default_dictionary,
    default_patterns,
};
use morelike_prng::{PunRng, RandomSource};

use crate::phrase::{format_morelike, transform_phrase};
use crate::vocabulary::{IgnoreList, SubstituteVocabulary};
use crate::word::WordTransformer;

#[derive(Debug, Clone)]
pub struct Engine<P = PronouncingDictionary, S = HyphenationPatterns> {
    resolver: P,
    syllabifier: S,
    vocabulary: SubstituteVocabulary,
    ignored: IgnoreList,
}

impl<P, S> Engine<P, S>
where
    P: PhoneticResolver,
    S: Syllabifier,
{
    /// Build an engine. Substitute words are resolved once here; words
    /// without a usable pronunciation are logged and skipped.
    pub fn new<I, J>(resolver: P, syllabifier: S, substitute_words: I, ignored_words: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let vocabulary = SubstituteVocabulary::build(substitute_words, &resolver);
        let ignored = IgnoreList::new(ignored_words);
        tracing::debug!(
            substitutes = vocabulary.len(),
            ignored = ignored.len(),
            "morelike engine ready"
        );
        Self {
            resolver,
            syllabifier,
            vocabulary,
            ignored,
        }
    }

    pub fn resolver(&self) -> &P {
        &self.resolver
    }

    pub fn syllabifier(&self) -> &S {
        &self.syllabifier
    }

    pub fn vocabulary(&self) -> &SubstituteVocabulary {
        &self.vocabulary
    }

    pub fn ignored(&self) -> &IgnoreList {
        &self.ignored
    }

    fn transformer(&self) -> WordTransformer<'_, P, S> {
        WordTransformer::new(&self.resolver, &self.syllabifier)
    }

    /// Transform a single token.
    pub fn transform_word<R: RandomSource + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        self.transformer()
            .transform_word(word, &self.vocabulary, &self.ignored, rng)
    }

    /// Transform every token of `phrase` without the template.
    pub fn transform_phrase<R: RandomSource + ?Sized>(&self, phrase: &str, rng: &mut R) -> String {
        transform_phrase(self.transformer(), phrase, &self.vocabulary, &self.ignored, rng)
    }

    /// Produce `"{phrase}? More like {transformed}"`.
    pub fn morelike<R: RandomSource + ?Sized>(&self, phrase: &str, rng: &mut R) -> String {
        let transformed = self.transform_phrase(phrase, rng);
        format_morelike(phrase, &transformed)
    }
}

impl Engine {
    /// Engine over the embedded dictionary and hyphenation patterns.
    pub fn with_defaults<I, J>(substitute_words: I, ignored_words: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        Self::new(
            default_dictionary(),
            default_patterns(),
            substitute_words,
            ignored_words,
        )
    }
}

/// One-shot `"X? More like Y"` over the embedded data and an entropy-seeded
/// generator.
///
/// The embedded dictionary is a small sample, so most real words pass
/// through unchanged. Build an `Engine` over a full `cmudict.dict` and
/// pattern file for general input.
pub fn morelike(phrase: &str, substitute_words: &[&str], ignored_words: &[&str]) -> String {
    let engine = Engine::with_defaults(substitute_words, ignored_words);
    let mut rng = PunRng::from_entropy();
    engine.morelike(phrase, &mut rng)
}
