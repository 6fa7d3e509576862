// Phonetic and orthographic data for the morelike engine.
//
// Provides the two leaf capabilities the word transformer is built on,
// each as a trait plus a data-backed implementation:
//
// - `types.rs`: `Stress`, `Phoneme`, `Pronunciation` (typed ARPABET,
//   rhyming-part extraction, phoneme-aligned containment)
// - `dictionary.rs`: `PhoneticResolver` trait and `PronouncingDictionary`,
//   a CMU `cmudict.dict` loader
// - `hyphenation.rs`: `Syllabifier` trait and `HyphenationPatterns`, a
//   Liang pattern engine reading hunspell `.dic` files
// - `error.rs`: `PhoneticsError` for load-time failures
//
// Both data sets ship small embedded defaults under `data/` via
// `include_str!`; every loader takes text in and returns a typed struct.
// Nothing here holds global state. Callers construct the dictionary and
// pattern table once and pass them by reference.

pub mod dictionary;
pub mod error;
pub mod hyphenation;
pub mod types;

pub use dictionary::{PhoneticResolver, PronouncingDictionary, default_dictionary};
pub use error::PhoneticsError;
pub use hyphenation::{HyphenationPatterns, Syllabifier, default_patterns};
pub use types::{Phoneme, Pronunciation, Stress};
