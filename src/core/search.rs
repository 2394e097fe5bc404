use std::ops::Range;

use regex::{NoExpand, Regex, RegexBuilder};
use ropey::Rope;

/// Case-insensitive literal matcher. All ranges are char offsets into the rope.
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(needle: &str) -> anyhow::Result<Self> {
        if needle.is_empty() {
            anyhow::bail!("Nothing to search for");
        }

        let regex = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()?;

        Ok(Self { regex })
    }

    /// First match starting at or after char offset `from`.
    pub fn find_from(&self, rope: &Rope, from: usize) -> Option<Range<usize>> {
        if from > rope.len_chars() {
            return None;
        }

        let text = rope.to_string();
        let found = self.regex.find_at(&text, rope.char_to_byte(from))?;

        Some(rope.byte_to_char(found.start())..rope.byte_to_char(found.end()))
    }

    pub fn find_last(&self, rope: &Rope) -> Option<Range<usize>> {
        let text = rope.to_string();
        let found = self.regex.find_iter(&text).last()?;

        Some(rope.byte_to_char(found.start())..rope.byte_to_char(found.end()))
    }

    pub fn is_match_exact(&self, candidate: &str) -> bool {
        self.regex
            .find(candidate)
            .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
    }

    /// Replaces every match, returning the new text and the number of replacements.
    pub fn replace_all(&self, text: &str, replacement: &str) -> (String, usize) {
        let count = self.regex.find_iter(text).count();
        let replaced = self.regex.replace_all(text, NoExpand(replacement));

        (replaced.into_owned(), count)
    }
}
