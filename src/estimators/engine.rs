//! Incremental tuple frequency search.
//!
//! Counts every tuple of the current length, then grows the length by one
//! symbol, re-scanning only the starting positions of tuples that were
//! frequent at the previous length. Both estimators run this search and
//! differ only in the [`RoundRule`] they plug in.

use serde::Serialize;
use std::collections::BTreeMap;

/// Starting positions of every distinct tuple of one length.
///
/// Keys borrow from the sample, so a round never copies symbols.
#[derive(Debug)]
pub struct OccurrenceTable<'a, S> {
    tuple_length: usize,
    entries: BTreeMap<&'a [S], Vec<usize>>,
    max_count: usize,
}

impl<'a, S: Ord> OccurrenceTable<'a, S> {
    fn new() -> Self {
        Self {
            tuple_length: 0,
            entries: BTreeMap::new(),
            max_count: 0,
        }
    }

    /// Scans every valid starting position.
    fn scan_all(&mut self, sample: &'a [S], tuple_length: usize) {
        self.reset(tuple_length);
        let Some(last) = sample.len().checked_sub(tuple_length) else {
            return;
        };
        for pos in 0..=last {
            self.record(sample, pos);
        }
    }

    /// Extends the frequent tuples of `previous` by one symbol.
    fn extend_from(&mut self, sample: &'a [S], previous: &Self, threshold: usize) {
        self.reset(previous.tuple_length + 1);
        for positions in previous.entries.values() {
            if positions.len() < threshold {
                continue;
            }
            for &pos in positions {
                if pos + self.tuple_length <= sample.len() {
                    self.record(sample, pos);
                }
            }
        }
    }

    fn record(&mut self, sample: &'a [S], pos: usize) {
        let positions = self
            .entries
            .entry(&sample[pos..pos + self.tuple_length])
            .or_default();
        positions.push(pos);
        self.max_count = self.max_count.max(positions.len());
    }

    fn reset(&mut self, tuple_length: usize) {
        self.entries.clear();
        self.tuple_length = tuple_length;
        self.max_count = 0;
    }

    /// Length of every tuple in the table.
    pub fn tuple_length(&self) -> usize {
        self.tuple_length
    }

    /// Occurrence count of the most frequent tuple.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Number of distinct tuples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tuple of this length fits in the sample.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count of each distinct tuple.
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.values().map(Vec::len)
    }

    /// Starting positions of `tuple`, in scan order.
    pub fn positions(&self, tuple: &[S]) -> Option<&[usize]> {
        self.entries.get(tuple).map(Vec::as_slice)
    }
}

/// Per-estimator accounting plugged into [`TupleSearch`].
pub trait RoundRule {
    /// Minimum count for a tuple to be extended; the search stops once the
    /// most frequent tuple falls below it.
    const THRESHOLD: usize;

    /// Aggregate statistic of a round.
    fn statistic<S: Ord>(table: &OccurrenceTable<'_, S>) -> u64;

    /// Per-symbol entropy of a round, or `None` if the round is degenerate.
    fn round_entropy(statistic: u64, sample_len: usize, tuple_length: usize) -> Option<f64>;
}

/// What one round of the search observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundSummary {
    /// Tuple length of the round.
    pub tuple_length: usize,
    /// Occurrence count of the most frequent tuple.
    pub max_count: usize,
    /// Rule-specific aggregate statistic.
    pub statistic: u64,
    /// Entropy contribution, if the round produced one.
    pub entropy: Option<f64>,
}

/// Outcome of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Tuple length the search started at.
    pub start_length: usize,
    /// Tuple length at which the stop condition fired.
    pub final_length: usize,
    /// Running minimum of the per-round entropies and the ceiling.
    pub min_entropy: f64,
    /// Rounds that met the threshold, in order.
    pub rounds: Vec<RoundSummary>,
}

/// Tuple frequency search for one sample.
pub struct TupleSearch<'a, S> {
    sample: &'a [S],
    ceiling: f64,
    start_length: usize,
}

impl<'a, S: Ord> TupleSearch<'a, S> {
    /// Creates a search starting at tuple length 1.
    pub fn new(sample: &'a [S], ceiling: f64) -> Self {
        Self {
            sample,
            ceiling,
            start_length: 1,
        }
    }

    /// Starts the search at `length` instead of 1.
    pub fn starting_at(mut self, length: usize) -> Self {
        self.start_length = length.max(1);
        self
    }

    /// Runs rounds until the most frequent tuple drops below the rule's
    /// threshold.
    pub fn run<R: RoundRule>(&self) -> SearchOutcome {
        let n = self.sample.len();
        let mut min_entropy = self.ceiling;
        let mut rounds = Vec::new();

        let mut current = OccurrenceTable::new();
        let mut previous = OccurrenceTable::new();
        current.scan_all(self.sample, self.start_length);

        while current.max_count() >= R::THRESHOLD {
            let tuple_length = current.tuple_length();
            let statistic = R::statistic(&current);
            let entropy = R::round_entropy(statistic, n, tuple_length);
            if let Some(h) = entropy {
                min_entropy = min_entropy.min(h);
            }

            tracing::trace!(
                tuple_length,
                max_count = current.max_count(),
                distinct = current.len(),
                statistic,
                entropy,
                "Tuple round"
            );
            rounds.push(RoundSummary {
                tuple_length,
                max_count: current.max_count(),
                statistic,
                entropy,
            });

            std::mem::swap(&mut current, &mut previous);
            current.extend_from(self.sample, &previous, R::THRESHOLD);
            previous.reset(0);
        }

        SearchOutcome {
            start_length: self.start_length,
            final_length: current.tuple_length(),
            min_entropy,
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts rounds without contributing entropy.
    struct Repeats;

    impl RoundRule for Repeats {
        const THRESHOLD: usize = 2;

        fn statistic<S: Ord>(table: &OccurrenceTable<'_, S>) -> u64 {
            table.max_count() as u64
        }

        fn round_entropy(_: u64, _: usize, _: usize) -> Option<f64> {
            None
        }
    }

    #[test]
    fn test_scan_all_counts_every_position() {
        let sample = b"abab";
        let mut table = OccurrenceTable::new();
        table.scan_all(&sample[..], 2);

        assert_eq!(table.len(), 2);
        assert_eq!(table.positions(b"ab"), Some(&[0, 2][..]));
        assert_eq!(table.positions(b"ba"), Some(&[1][..]));
        assert_eq!(table.max_count(), 2);
    }

    #[test]
    fn test_short_sample_gives_empty_table() {
        let sample = b"ab";
        let mut table = OccurrenceTable::new();
        table.scan_all(&sample[..], 3);
        assert!(table.is_empty());
        assert_eq!(table.max_count(), 0);

        let mut empty = OccurrenceTable::<u8>::new();
        empty.scan_all(&[], 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_only_frequent_prefixes_are_extended() {
        let sample = b"aabab";
        let mut first = OccurrenceTable::new();
        first.scan_all(&sample[..], 1);
        assert_eq!(first.positions(b"a"), Some(&[0, 1, 3][..]));

        let mut second = OccurrenceTable::new();
        second.extend_from(&sample[..], &first, 3);

        // only "a" met the threshold, so every key starts with 'a'
        assert_eq!(second.positions(b"aa"), Some(&[0][..]));
        assert_eq!(second.positions(b"ab"), Some(&[1, 3][..]));
        assert_eq!(second.positions(b"ba"), None);
        assert_eq!(second.counts().sum::<usize>(), 3);
    }

    #[test]
    fn test_extension_skips_positions_past_the_end() {
        let sample = b"aaa";
        let mut first = OccurrenceTable::new();
        first.scan_all(&sample[..], 1);

        let mut second = OccurrenceTable::new();
        second.extend_from(&sample[..], &first, 2);
        assert_eq!(second.positions(b"aa"), Some(&[0, 1][..]));
    }

    #[test]
    fn test_search_stops_at_first_unrepeated_length() {
        // longest repeated substring is "abc"
        let sample = b"abcxabcy";
        let outcome = TupleSearch::new(&sample[..], 3.0).run::<Repeats>();

        assert_eq!(outcome.start_length, 1);
        assert_eq!(outcome.final_length, 4);
        assert_eq!(
            outcome.rounds.iter().map(|r| r.tuple_length).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(outcome.min_entropy, 3.0);
    }

    #[test]
    fn test_search_without_repeats_keeps_ceiling() {
        let sample = b"abcdef";
        let outcome = TupleSearch::new(&sample[..], 5.0).run::<Repeats>();
        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.final_length, 1);
        assert_eq!(outcome.min_entropy, 5.0);
    }

    #[test]
    fn test_start_length_beyond_sample() {
        let sample = b"aaaa";
        let outcome = TupleSearch::new(&sample[..], 2.0)
            .starting_at(9)
            .run::<Repeats>();
        assert!(outcome.rounds.is_empty());
        assert_eq!(outcome.final_length, 9);
    }

    #[test]
    fn test_zero_start_length_defaults_to_one() {
        let sample = b"aa";
        let outcome = TupleSearch::new(&sample[..], 1.0)
            .starting_at(0)
            .run::<Repeats>();
        assert_eq!(outcome.start_length, 1);
        assert_eq!(outcome.final_length, 2);
    }
}
