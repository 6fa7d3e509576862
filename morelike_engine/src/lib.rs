// "X? More like Y" pun engine.
//
// Rewrites each word of a phrase by swapping one of its syllables for a
// configured substitute word that rhymes with it, then renders the result
// as `"{phrase}? More like {transformed}"`.
//
// - `vocabulary.rs`: `SubstituteVocabulary` (donor words with their
//   rhyming parts) and `IgnoreList`
// - `word.rs`: `WordTransformer`, the per-token algorithm
// - `phrase.rs`: whitespace tokenization and the output template
// - `engine.rs`: `Engine`, an owned bundle of the above, and the one-shot
//   `morelike()` function
//
// Phonetic data comes from `morelike_phonetics`; randomness is injected
// through `morelike_prng::RandomSource` so every result is reproducible
// under a seeded or scripted source.

pub mod engine;
pub mod phrase;
pub mod vocabulary;
pub mod word;

pub use engine::{Engine, morelike};
pub use phrase::{SEPARATOR, format_morelike, transform_phrase};
pub use vocabulary::{IgnoreList, SubstituteEntry, SubstituteVocabulary};
pub use word::{WordTransformer, strip_non_alphanumeric};
