// Phrase-level transformation and the "X? More like Y" template.
//
// A phrase is split on any run of whitespace, each token goes through the
// word transformer on its own, and the results are joined with single
// spaces. Collapsing whitespace this way is intended. The original phrase
// is echoed verbatim in front of the separator.

use morelike_phonetics::{PhoneticResolver, Syllabifier};
use morelike_prng::RandomSource;

use crate::vocabulary::{IgnoreList, SubstituteVocabulary};
use crate::word::WordTransformer;

/// Text between the original phrase and its transformation.
pub const SEPARATOR: &str = "? More like ";

/// Transform every token of `phrase` independently.
pub fn transform_phrase<P, S, R>(
    transformer: WordTransformer<'_, P, S>,
    phrase: &str,
    vocabulary: &SubstituteVocabulary,
    ignored: &IgnoreList,
    rng: &mut R,
) -> String
where
    P: PhoneticResolver + ?Sized,
    S: Syllabifier + ?Sized,
    R: RandomSource + ?Sized,
{
    phrase
        .split_whitespace()
        .map(|token| transformer.transform_word(token, vocabulary, ignored, rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the final `"{original}? More like {transformed}"` line.
pub fn format_morelike(original: &str, transformed: &str) -> String {
    format!("{original}{SEPARATOR}{transformed}")
}
