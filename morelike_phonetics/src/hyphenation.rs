// Orthographic syllabification with Liang hyphenation patterns.
//
// This is the algorithm TeX and hunspell use. A pattern such as `1ba` or
// `c2h` is a letter string with a digit between (or around) the letters.
// Every pattern that occurs anywhere in the word, with `.` marking the word
// boundaries, contributes its digits to the gaps it covers; each gap keeps
// the highest digit seen. An odd final value allows a break, an even one
// forbids it. Breaks within `left_min` letters of the start or `right_min`
// letters of the end are dropped. Both margins are 2 unless overridden with
// `with_margins`.
//
// Pattern files use the hunspell `.dic` layout: an optional charset first
// line, uppercase directives, `%` comments, then whitespace-separated
// patterns. Directives are skipped, `LEFTHYPHENMIN`/`RIGHTHYPHENMIN`
// included, so a file cannot change the margins. Non-standard patterns
// (containing `/` or `=`) are skipped too.
//
// `default_patterns()` embeds `data/hyph_en_US.dic`, a compact rule set
// that covers common English consonant/vowel boundaries. The bot can load a
// full upstream pattern file via `--patterns`.
//
// Matching is case-insensitive; the pieces returned by `syllabify` keep the
// caller's casing and always concatenate back to the input.

use std::collections::HashMap;
use std::path::Path;

use crate::error::PhoneticsError;

/// Splits a spelling into syllable-sized pieces.
pub trait Syllabifier {
    /// Pieces whose concatenation equals `spelling`. A word with no break
    /// point comes back as a single piece.
    fn syllabify(&self, spelling: &str) -> Vec<String>;
}

/// Liang pattern table plus break margins.
#[derive(Debug, Clone)]
pub struct HyphenationPatterns {
    /// Pattern letters (lowercase, `.` for boundary) to gap priorities.
    /// The priority vector is one longer than the letter count.
    patterns: HashMap<String, Vec<u8>>,
    /// Longest pattern in chars; bounds the substring scan.
    max_len: usize,
    left_min: usize,
    right_min: usize,
}

impl Default for HyphenationPatterns {
    fn default() -> Self {
        Self {
            patterns: HashMap::new(),
            max_len: 0,
            left_min: 2,
            right_min: 2,
        }
    }
}

impl HyphenationPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a hunspell/TeX `.dic` pattern file.
    pub fn from_dic_str(text: &str) -> Result<Self, PhoneticsError> {
        let mut table = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('%').next().unwrap_or_default().trim();
            if line.is_empty() || (idx == 0 && is_charset_line(line)) {
                continue;
            }

            if line.starts_with(|c: char| c.is_ascii_uppercase()) {
                tracing::debug!(line = line_no, directive = line, "skipping directive");
                continue;
            }

            for pattern in line.split_whitespace() {
                if pattern.contains(['/', '=']) {
                    tracing::debug!(line = line_no, pattern, "skipping non-standard pattern");
                    continue;
                }
                table
                    .insert_pattern(pattern)
                    .map_err(|reason| PhoneticsError::MalformedPattern {
                        line: line_no,
                        reason,
                    })?;
            }
        }
        Ok(table)
    }

    /// Read and parse a pattern file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PhoneticsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PhoneticsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_dic_str(&text)?;
        tracing::info!(path = %path.display(), patterns = table.len(), "loaded hyphenation patterns");
        Ok(table)
    }

    /// Override the minimum letters kept before the first and after the
    /// last break.
    pub fn with_margins(mut self, left_min: usize, right_min: usize) -> Self {
        self.left_min = left_min;
        self.right_min = right_min;
        self
    }

    /// Add one pattern such as `1ba`, `c2h` or `2te.`.
    pub fn insert_pattern(&mut self, pattern: &str) -> Result<(), String> {
        let mut letters = String::new();
        let mut priorities = vec![0u8];
        for c in pattern.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    if let Some(last) = priorities.last_mut() {
                        *last = d as u8;
                    }
                }
                None => {
                    letters.extend(c.to_lowercase());
                    priorities.push(0);
                }
            }
        }

        let len = letters.chars().count();
        if len == 0 || len + 1 != priorities.len() {
            return Err(format!("`{pattern}` has no usable letters"));
        }
        self.max_len = self.max_len.max(len);
        self.patterns.insert(letters, priorities);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Char offsets in `word` where a break is allowed, ascending.
    pub fn break_positions(&self, word: &str) -> Vec<usize> {
        let n = word.chars().count();
        if n == 0 || self.patterns.is_empty() {
            return Vec::new();
        }

        let mut dotted: Vec<char> = Vec::with_capacity(n + 2);
        dotted.push('.');
        dotted.extend(word.chars().map(|c| c.to_lowercase().next().unwrap_or(c)));
        dotted.push('.');

        // gaps[g] sits between dotted[g - 1] and dotted[g].
        let mut gaps = vec![0u8; dotted.len() + 1];
        let mut key = String::new();
        for start in 0..dotted.len() {
            key.clear();
            let end = (start + self.max_len).min(dotted.len());
            for &c in &dotted[start..end] {
                key.push(c);
                if let Some(priorities) = self.patterns.get(&key) {
                    for (offset, &p) in priorities.iter().enumerate() {
                        let gap = &mut gaps[start + offset];
                        *gap = (*gap).max(p);
                    }
                }
            }
        }

        // Word offset `pos` is the gap before dotted[pos + 1].
        (1..n)
            .filter(|&pos| gaps[pos + 1] % 2 == 1)
            .filter(|&pos| pos >= self.left_min && pos + self.right_min <= n)
            .collect()
    }
}

impl Syllabifier for HyphenationPatterns {
    fn syllabify(&self, spelling: &str) -> Vec<String> {
        let breaks = self.break_positions(spelling);
        let mut pieces = Vec::with_capacity(breaks.len() + 1);
        let mut current = String::new();
        let mut next_break = breaks.iter().peekable();
        for (i, c) in spelling.chars().enumerate() {
            if next_break.next_if(|&&b| b == i).is_some() {
                pieces.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        pieces.push(current);
        pieces
    }
}

/// Load the pattern set embedded at compile time.
///
/// Panics if the embedded file is malformed (should never happen in a
/// released build).
pub fn default_patterns() -> HyphenationPatterns {
    let text = include_str!("../../data/hyph_en_US.dic");
    HyphenationPatterns::from_dic_str(text).expect("embedded hyph_en_US.dic is malformed")
}

fn is_charset_line(line: &str) -> bool {
    let upper = line.to_ascii_uppercase();
    ["UTF-", "ISO", "KOI", "MICROSOFT-", "TIS-", "CP"]
        .iter()
        .any(|prefix| upper.starts_with(prefix))
}
