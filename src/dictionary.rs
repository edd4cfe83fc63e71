//! Loads the dictionary of target words.

use crate::error::JobError;
use bytes::Bytes;
use fnv::FnvHashSet;

/// The fixed set of words to count; every other token is ignored.
///
/// A dictionary is created once per job run and shared read-only with
/// every map task. No mutation path exists after construction, so the map
/// tasks need no synchronization around it.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: FnvHashSet<String>,
}

impl Dictionary {
    /// Parse a dictionary from a text blob of whitespace-separated words.
    ///
    /// Any run of space, tab or newline separates words; empty tokens are
    /// discarded. No case normalization is applied: the set contains
    /// exactly the casing present in the blob.
    pub fn from_blob(blob: &Bytes) -> Result<Self, JobError> {
        let text = std::str::from_utf8(blob).map_err(JobError::load)?;
        Ok(Self::parse(text))
    }

    /// Parse a dictionary from an in-memory string.
    ///
    /// Same tokenization as [`Dictionary::from_blob`].
    pub fn parse(text: &str) -> Self {
        let words = text.split_whitespace().map(str::to_owned).collect();
        Self { words }
    }

    /// Membership test for a single token, exact-case.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        let dict = Dictionary::parse("cat  dog\n\that\n");
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("cat"));
        assert!(dict.contains("dog"));
        assert!(dict.contains("hat"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn preserves_casing_as_loaded() {
        let dict = Dictionary::parse("The the");
        assert!(dict.contains("The"));
        assert!(dict.contains("the"));
        assert!(!dict.contains("THE"));
    }

    #[test]
    fn empty_blob_gives_empty_dictionary() {
        let dict = Dictionary::from_blob(&Bytes::from_static(b"  \n ")).unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_load_error() {
        let err = Dictionary::from_blob(&Bytes::from_static(&[0xff, 0xfe])).unwrap_err();
        assert!(matches!(err, JobError::Load(_)));
    }
}
