//! Candidate relevance scoring.
//!
//! Candidates are scored on word overlap with the query, discounted by
//! how consistent the two word sets are and by where the candidate sat
//! in the provider's result listing. The numbers here are calibrated
//! against real search listings; changing any of them shifts which of
//! two plausible titles wins, so treat them as a unit.

use tracing::trace;

use crate::provider::TitleId;

/// Scores below this are noise and the candidate is dropped.
pub const SCORE_FLOOR: f64 = 1000.0;

/// Words of a normalized title, in order, duplicates kept.
#[derive(Debug, Clone)]
pub struct WordBag {
    words: Vec<String>,
}

impl WordBag {
    pub fn new(text: &str) -> Self {
        Self {
            words: text
                .split(' ')
                .filter(|word| !word.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// A surviving search hit, ready for scoring.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: TitleId,
    pub words: WordBag,
    /// Listing-position penalty, see [`ordinal`].
    pub ordinal: f64,
    pub score: f64,
}

impl Candidate {
    pub fn new(id: TitleId, normalized_title: &str, ordinal: f64) -> Self {
        Self {
            id,
            words: WordBag::new(normalized_title),
            ordinal,
            score: 0.0,
        }
    }
}

/// Listing-position penalty for the `set`-th kept entry of the
/// `block`-th result block, both one-based. Later blocks are penalized
/// superlinearly; position within a block linearly.
pub fn ordinal(set: usize, block: usize) -> f64 {
    set as f64 * (block as f64).powf(1.5)
}

/// Relevance of one candidate against the query words, or `None` when
/// the candidate should be discarded.
///
/// Overlap counts query words with multiplicity: a word the query
/// repeats counts once per repetition if the candidate has it at all.
pub fn relevance(query: &WordBag, candidate: &Candidate) -> Option<f64> {
    let query_count = query.len();
    let candidate_count = candidate.words.len();

    let overlapping = query
        .iter()
        .filter(|word| candidate.words.contains(word))
        .count();
    if overlapping == 0 {
        return None;
    }

    let highest = query_count.max(candidate_count);
    let missing = highest - overlapping;
    let spread = query_count.abs_diff(candidate_count) + 1;

    let consistency = (missing as f64 - overlapping as f64 / highest as f64) * spread as f64;
    if highest as f64 * 1.4 < consistency {
        return None;
    }

    let zone = 20.0 - consistency;
    let exponent = (zone / 4.0).max(1.0);
    let mut score = (overlapping as f64 * zone).powf(exponent) / candidate.ordinal;

    // A candidate the query covers completely, at nearly the same
    // length, is almost certainly the title being asked for.
    if candidate_count == overlapping && (spread == 1 || spread == 2) {
        score *= 10.0 * overlapping as f64 * spread as f64;
    }

    if score < SCORE_FLOOR {
        return None;
    }
    Some(score)
}

/// Score every candidate in place, dropping the ones that fail.
pub fn score_candidates(query: &WordBag, candidates: &mut Vec<Candidate>) {
    candidates.retain_mut(|candidate| match relevance(query, candidate) {
        Some(score) => {
            candidate.score = score;
            true
        }
        None => {
            trace!(id = %candidate.id, "candidate discarded");
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, ordinal: f64) -> Candidate {
        Candidate::new(TitleId(1), text, ordinal)
    }

    #[test]
    fn word_bag_splits_and_skips_empties() {
        let bag = WordBag::new("the dark knight");
        assert_eq!(bag.len(), 3);
        assert!(bag.contains("dark"));
        assert!(!bag.contains("knight rises"));
        assert!(WordBag::new("").is_empty());
    }

    #[test]
    fn no_overlap_is_discarded() {
        let query = WordBag::new("inception");
        assert!(relevance(&query, &candidate("memento", 1.0)).is_none());
    }

    #[test]
    fn wide_spread_trips_the_consistency_gate() {
        // One shared word across a five-word length gap.
        let query = WordBag::new("movie title");
        let far = candidate("movie of a totally different seven thing", 1.0);
        assert!(relevance(&query, &far).is_none());
    }

    #[test]
    fn weak_match_survives_only_at_low_ordinals() {
        let query = WordBag::new("saw");
        let near = candidate("saw ii", 1.0);
        assert!(relevance(&query, &near).is_some());

        let deep = candidate("saw ii", 2500.0);
        assert!(relevance(&query, &deep).is_none());
    }

    #[test]
    fn ordinal_divides_the_score_linearly() {
        let query = WordBag::new("the dark knight");
        let front = relevance(&query, &candidate("the dark knight", ordinal(1, 1))).unwrap();
        let deep = relevance(&query, &candidate("the dark knight", ordinal(1, 4))).unwrap();
        // Block 4 carries an 8x penalty over block 1.
        assert_eq!(ordinal(1, 4), 8.0);
        assert_eq!(front, deep * 8.0);
    }

    #[test]
    fn more_shared_words_never_score_lower() {
        // Same candidate, same query length: only the overlap grows, so
        // the length spread and the word-count ceiling stay fixed.
        let hit = candidate("alpha beta gamma delta epsilon", 1.0);
        let scores: Vec<f64> = [
            "alpha beta foo bar",
            "alpha beta gamma bar",
            "alpha beta gamma delta",
        ]
        .iter()
        .map(|text| relevance(&WordBag::new(text), &hit).unwrap())
        .collect();
        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn exact_title_outranks_longer_title() {
        let query = WordBag::new("alien");
        let exact = relevance(&query, &candidate("alien", 1.0)).unwrap();
        let longer = relevance(&query, &candidate("alien resurrection", 1.0)).unwrap();
        assert!(exact > longer);
    }

    #[test]
    fn near_exact_bonus_needs_full_coverage() {
        let query = WordBag::new("dark knight rises");
        // Fully covered, one word shorter: bonus applies.
        let covered = relevance(&query, &candidate("dark knight", 1.0)).unwrap();
        // Same overlap but with an extra foreign word: no bonus.
        let padded = relevance(&query, &candidate("dark knight returns", 1.0)).unwrap();
        assert!(covered > padded);
    }

    #[test]
    fn repeated_query_words_count_per_occurrence() {
        let query = WordBag::new("la la land");
        let hit = candidate("la land", 1.0);
        let score = relevance(&query, &hit).unwrap();
        assert!(score > SCORE_FLOOR);
    }

    #[test]
    fn score_candidates_drops_failures_in_place() {
        let query = WordBag::new("the dark knight");
        let mut candidates = vec![
            candidate("the dark knight", ordinal(1, 1)),
            candidate("something else entirely unrelated to it all", ordinal(2, 1)),
            candidate("the dark knight rises", ordinal(3, 1)),
        ];
        score_candidates(&query, &mut candidates);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.score >= SCORE_FLOOR));
    }
}
