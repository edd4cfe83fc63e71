//! The map stage: per-record tokenization and dictionary filtering.

use crate::dictionary::Dictionary;
use crate::error::RecordDecodeError;
use crate::progress::{MatchCounter, StatusSink, STATUS_EVERY_RECORDS};
use crate::{CountEvent, PartitionId};
use bytes::Bytes;
use itertools::Itertools;
use std::sync::Arc;

/// Filters the records of one partition against the dictionary.
///
/// This is a filter, not a general word count: tokens absent from the
/// dictionary are silently dropped. One `TokenFilter` is created per
/// partition; it owns that partition's record bookkeeping for the
/// periodic status reports.
pub struct TokenFilter {
    partition: PartitionId,
    dictionary: Arc<Dictionary>,
    case_sensitive: bool,
    records_seen: u64,
    matched: Arc<MatchCounter>,
    status: Arc<dyn StatusSink>,
}

impl TokenFilter {
    pub fn new(
        partition: PartitionId,
        dictionary: Arc<Dictionary>,
        case_sensitive: bool,
        matched: Arc<MatchCounter>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            partition,
            dictionary,
            case_sensitive,
            records_seen: 0,
            matched,
            status,
        }
    }

    /// Tokenize one record and emit a count-of-1 event per dictionary
    /// match, in token order.
    ///
    /// When matching case-insensitively the whole line is lowercased
    /// before tokenizing; the dictionary itself is never normalized.
    /// Every call counts as one processed record, and every
    /// [`STATUS_EVERY_RECORDS`] records a status update goes to the sink.
    pub fn filter_record(&mut self, record: &Bytes) -> Result<Vec<CountEvent>, RecordDecodeError> {
        let outcome = self.match_tokens(record);
        self.records_seen += 1;
        if self.records_seen % STATUS_EVERY_RECORDS == 0 {
            self.status.report(self.partition, self.records_seen);
        }
        outcome
    }

    fn match_tokens(&self, record: &Bytes) -> Result<Vec<CountEvent>, RecordDecodeError> {
        let text = std::str::from_utf8(record)?;
        let line = if self.case_sensitive {
            text.to_owned()
        } else {
            text.to_lowercase()
        };

        let events = line
            .split_whitespace()
            .filter(|token| self.dictionary.contains(token))
            .map(|token| CountEvent::once(token.to_owned()))
            .collect_vec();
        self.matched.add(events.len() as u64);
        Ok(events)
    }

    /// Records processed by this filter so far, matched or not.
    pub fn records_seen(&self) -> u64 {
        self.records_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<(PartitionId, u64)>>);

    impl StatusSink for RecordingSink {
        fn report(&self, partition: PartitionId, records: u64) {
            self.0.lock().unwrap().push((partition, records));
        }
    }

    fn filter_with(
        dict: &str,
        case_sensitive: bool,
        status: Arc<dyn StatusSink>,
    ) -> (TokenFilter, Arc<MatchCounter>) {
        let matched = Arc::new(MatchCounter::default());
        let filter = TokenFilter::new(
            0,
            Arc::new(Dictionary::parse(dict)),
            case_sensitive,
            Arc::clone(&matched),
            status,
        );
        (filter, matched)
    }

    fn words(events: &[CountEvent]) -> Vec<&str> {
        events.iter().map(CountEvent::word).collect()
    }

    #[test]
    fn emits_only_dictionary_members() {
        let (mut filter, _) = filter_with("cat dog", true, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"the cat sat on the dog with a hat"))
            .unwrap();
        assert_eq!(words(&events), vec!["cat", "dog"]);
        let dict = Dictionary::parse("cat dog");
        assert!(events.iter().all(|event| dict.contains(event.word())));
    }

    #[test]
    fn every_event_carries_count_one() {
        let (mut filter, _) = filter_with("cat", true, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"cat cat cat"))
            .unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|event| event.count == 1));
    }

    #[test]
    fn case_sensitive_matches_exact_casing_only() {
        let (mut filter, _) = filter_with("the", true, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"The THE the"))
            .unwrap();
        assert_eq!(words(&events), vec!["the"]);
    }

    #[test]
    fn case_insensitive_lowercases_the_record() {
        let (mut filter, _) = filter_with("the", false, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"The THE the"))
            .unwrap();
        assert_eq!(words(&events), vec!["the", "the", "the"]);
    }

    // The dictionary is loaded without normalization, so an uppercase
    // dictionary entry can never match once records are lowercased.
    #[test]
    fn uppercase_dictionary_entry_never_matches_case_insensitively() {
        let (mut filter, _) = filter_with("The", false, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"The THE the"))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn counts_matches_in_the_diagnostic_counter() {
        let (mut filter, matched) = filter_with("the", false, Arc::new(RecordingSink::default()));
        filter
            .filter_record(&Bytes::from_static(b"The THE the"))
            .unwrap();
        filter.filter_record(&Bytes::from_static(b"no hits")).unwrap();
        assert_eq!(matched.get(), 3);
        assert_eq!(filter.records_seen(), 2);
    }

    #[test]
    fn reports_status_every_hundred_records() {
        let sink = Arc::new(RecordingSink::default());
        let (mut filter, _) = filter_with("x", true, Arc::clone(&sink) as Arc<dyn StatusSink>);
        for _ in 0..250 {
            filter.filter_record(&Bytes::from_static(b"y")).unwrap();
        }
        assert_eq!(*sink.0.lock().unwrap(), vec![(0, 100), (0, 200)]);
    }

    #[test]
    fn malformed_record_is_an_error_but_still_counted() {
        let (mut filter, matched) = filter_with("cat", true, Arc::new(RecordingSink::default()));
        filter
            .filter_record(&Bytes::from_static(&[0xff, 0xfe]))
            .unwrap_err();
        let events = filter.filter_record(&Bytes::from_static(b"cat")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(filter.records_seen(), 2);
        assert_eq!(matched.get(), 1);
    }

    #[test]
    fn empty_dictionary_emits_nothing() {
        let (mut filter, matched) = filter_with("", true, Arc::new(RecordingSink::default()));
        let events = filter
            .filter_record(&Bytes::from_static(b"anything at all"))
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(matched.get(), 0);
    }
}
