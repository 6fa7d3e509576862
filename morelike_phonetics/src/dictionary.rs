// Pronouncing dictionary in CMU `cmudict.dict` format.
//
// Each line holds a word followed by its ARPABET phonemes:
//
//     hello HH AH0 L OW1
//     hello(2) HH EH0 L OW1
//     achill AE1 K IH0 L # place, irish
//
// Alternate readings carry a `(N)` suffix and are appended in file order, so
// the first pronunciation returned for a word is always the base entry.
// Lines starting with `;;;` (the legacy comment marker) and anything after a
// `#` are ignored. Words are stored lowercase and lookups lowercase their
// input, so `Hello` and `HELLO` resolve like `hello`.
//
// `PhoneticResolver` is the seam the word transformer depends on; this file
// provides the dictionary-backed implementation. `default_dictionary()`
// embeds `data/cmudict.dict` at compile time, a small subset useful for
// demos and tests. The bot loads the full upstream file via `--dictionary`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::PhoneticsError;
use crate::types::Pronunciation;

/// Maps words to their pronunciations.
pub trait PhoneticResolver {
    /// All known pronunciations of `word`, most common first. Unknown words
    /// return an empty slice.
    fn pronunciations(&self, word: &str) -> &[Pronunciation];

    /// Number of syllables in `pronunciation`.
    fn syllable_count(&self, pronunciation: &Pronunciation) -> usize {
        pronunciation.syllable_count()
    }
}

/// Dictionary-backed `PhoneticResolver`.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl PronouncingDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary from `cmudict.dict` text.
    pub fn from_cmudict_str(text: &str) -> Result<Self, PhoneticsError> {
        let mut dict = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }
            let (word, pronunciation) = parse_line(line, idx + 1)?;
            dict.insert(word, pronunciation);
        }
        Ok(dict)
    }

    /// Read and parse a dictionary file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PhoneticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PhoneticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dict = Self::from_cmudict_str(&text)?;
        tracing::info!(path = %path.display(), words = dict.len(), "loaded pronouncing dictionary");
        Ok(dict)
    }

    /// Append a pronunciation for `word` after any existing ones.
    pub fn insert(&mut self, word: &str, pronunciation: Pronunciation) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(pronunciation);
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PhoneticResolver for PronouncingDictionary {
    fn pronunciations(&self, word: &str) -> &[Pronunciation] {
        self.entries
            .get(&word.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Load the dictionary embedded at compile time.
///
/// Panics if the embedded file is malformed (should never happen in a
/// released build).
pub fn default_dictionary() -> PronouncingDictionary {
    let text = include_str!("../../data/cmudict.dict");
    PronouncingDictionary::from_cmudict_str(text).expect("embedded cmudict.dict is malformed")
}

fn strip_comment(raw: &str) -> &str {
    let line = raw.trim();
    if line.starts_with(";;;") {
        return "";
    }
    match line.find('#') {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

/// Split a non-empty line into its base word and pronunciation.
fn parse_line(line: &str, line_no: usize) -> Result<(&str, Pronunciation), PhoneticsError> {
    let malformed = |reason: String| PhoneticsError::MalformedEntry {
        line: line_no,
        reason,
    };

    let (term, phones) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| malformed(format!("`{line}` has no phonemes")))?;

    let word = match term.split_once('(') {
        Some((base, variant)) => {
            let digits = variant
                .strip_suffix(')')
                .ok_or_else(|| malformed(format!("unterminated variant in `{term}`")))?;
            if base.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit())
            {
                return Err(malformed(format!("bad variant marker in `{term}`")));
            }
            base
        }
        None => term,
    };

    let pronunciation: Pronunciation = phones
        .parse()
        .map_err(|e: PhoneticsError| malformed(e.to_string()))?;
    if pronunciation.is_empty() {
        return Err(malformed(format!("`{term}` has no phonemes")));
    }

    Ok((word, pronunciation))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
;;; comment header
cat K AE1 T

hello HH AH0 L OW1
hello(2) HH EH0 L OW1
achill AE1 K IH0 L # place, irish
";

    #[test]
    fn test_parses_entries_and_variants_in_order() {
        let dict = PronouncingDictionary::from_cmudict_str(SAMPLE).unwrap();
        assert_eq!(dict.len(), 3);

        let hello = dict.pronunciations("hello");
        assert_eq!(hello.len(), 2);
        assert_eq!(hello[0].to_string(), "HH AH0 L OW1");
        assert_eq!(hello[1].to_string(), "HH EH0 L OW1");
    }

    #[test]
    fn test_trailing_comment_is_dropped() {
        let dict = PronouncingDictionary::from_cmudict_str(SAMPLE).unwrap();
        assert_eq!(dict.pronunciations("achill")[0].to_string(), "AE1 K IH0 L");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = PronouncingDictionary::from_cmudict_str(SAMPLE).unwrap();
        assert_eq!(dict.pronunciations("CAT"), dict.pronunciations("cat"));
        assert_eq!(dict.pronunciations("Cat").len(), 1);
    }

    #[test]
    fn test_legacy_uppercase_format() {
        let dict = PronouncingDictionary::from_cmudict_str("CAT  K AE1 T\n").unwrap();
        assert_eq!(dict.pronunciations("cat").len(), 1);
    }

    #[test]
    fn test_unknown_word_is_empty_not_error() {
        let dict = PronouncingDictionary::from_cmudict_str(SAMPLE).unwrap();
        assert!(dict.pronunciations("zyzzyva").is_empty());
        assert!(dict.pronunciations("").is_empty());
    }

    #[test]
    fn test_syllable_count_through_resolver() {
        let dict = PronouncingDictionary::from_cmudict_str(SAMPLE).unwrap();
        let hello = &dict.pronunciations("hello")[0];
        assert_eq!(dict.syllable_count(hello), 2);
    }

    #[test]
    fn test_bad_phoneme_reports_line() {
        let err = PronouncingDictionary::from_cmudict_str("cat K AE1 T\ndog D ao1 G\n")
            .unwrap_err();
        match err {
            PhoneticsError::MalformedEntry { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_word_without_phonemes_is_rejected() {
        assert!(PronouncingDictionary::from_cmudict_str("lonely\n").is_err());
        assert!(PronouncingDictionary::from_cmudict_str("lonely # nothing\n").is_err());
    }

    #[test]
    fn test_bad_variant_marker_is_rejected() {
        assert!(PronouncingDictionary::from_cmudict_str("cat(x) K AE1 T\n").is_err());
        assert!(PronouncingDictionary::from_cmudict_str("cat(2 K AE1 T\n").is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dict = PronouncingDictionary::from_path(file.path()).unwrap();
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = PronouncingDictionary::from_path("/nonexistent/cmudict.dict").unwrap_err();
        assert!(matches!(err, PhoneticsError::Io { .. }));
    }

    #[test]
    fn test_default_dictionary_loads() {
        let dict = default_dictionary();
        assert!(dict.len() >= 80, "expected >= 80 words, got {}", dict.len());
        assert_eq!(dict.pronunciations("cat")[0].to_string(), "K AE1 T");
        assert_eq!(dict.pronunciations("the").len(), 3);
    }
}
