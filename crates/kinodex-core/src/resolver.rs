//! Title resolution.
//!
//! Ties the pieces together: normalize the query once, consult the
//! lookup store, probe the provider for a direct match, and otherwise
//! score the candidate listing to pick a winner. Lookup-store failures
//! degrade to misses; provider failures surface to the caller.

use kinodex_parse::normalize;
use tracing::{debug, trace, warn};

use crate::error::KinodexError;
use crate::lookup::Lookup;
use crate::mask::Mask;
use crate::provider::{ResultBlock, SearchProvider, TitleId};
use crate::query::TitleQuery;
use crate::score::{self, score_candidates, Candidate, WordBag};

pub struct Resolver<P> {
    provider: P,
    lookup: Option<Lookup>,
}

impl<P: SearchProvider> Resolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            lookup: None,
        }
    }

    /// Resolver backed by a lookup store for repeat queries.
    pub fn with_lookup(provider: P, lookup: Lookup) -> Self {
        Self {
            provider,
            lookup: Some(lookup),
        }
    }

    /// Resolve a query to a single title id.
    ///
    /// Returns [`KinodexError::NotFound`] when the query normalizes to
    /// nothing or no candidate survives filtering and scoring.
    #[tracing::instrument(skip(self, query), fields(title = %query.raw()))]
    pub async fn resolve(&self, query: &mut TitleQuery) -> Result<TitleId, KinodexError> {
        let normalized = query.normalized_title().to_owned();
        if normalized.is_empty() {
            return Err(KinodexError::NotFound);
        }
        let mask = query.mask().clone();

        if let Some(id) = self.recall(&normalized, &mask) {
            debug!(%id, "resolved from lookup store");
            return Ok(id);
        }

        if let Some(id) = self
            .provider
            .find_direct(&normalized)
            .await
            .map_err(|e| KinodexError::Provider(Box::new(e)))?
        {
            debug!(%id, "direct match");
            self.remember(&normalized, &mask, id);
            return Ok(id);
        }

        let blocks = self
            .provider
            .find_candidates(&normalized)
            .await
            .map_err(|e| KinodexError::Provider(Box::new(e)))?;

        let mut candidates = collect_candidates(&blocks, &mask);
        if candidates.is_empty() {
            return Err(KinodexError::NotFound);
        }

        let query_words = WordBag::new(&normalized);
        score_candidates(&query_words, &mut candidates);

        let Some(best) = select_best(&candidates) else {
            return Err(KinodexError::NotFound);
        };
        debug!(id = %best.id, score = best.score, "resolved by scoring");
        self.remember(&normalized, &mask, best.id);
        Ok(best.id)
    }

    fn recall(&self, search: &str, mask: &Mask) -> Option<TitleId> {
        let store = self.lookup.as_ref()?;
        match store.recall(search, mask.mode()) {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, "lookup read failed, treating as miss");
                None
            }
        }
    }

    fn remember(&self, search: &str, mask: &Mask, id: TitleId) {
        if let Some(store) = &self.lookup {
            if let Err(err) = store.remember(search, mask.mode(), id) {
                warn!(error = %err, "lookup write failed, result not cached");
            }
        }
    }
}

/// Flatten result blocks into scorable candidates.
///
/// Entries without a usable title or id, and entries the mask rejects,
/// are dropped without claiming a listing position. The set ordinal
/// restarts in every block; the block ordinal never does.
fn collect_candidates(blocks: &[ResultBlock], mask: &Mask) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let ordinal_block = index + 1;
        let mut ordinal_set = 1;
        for hit in &block.hits {
            let (Some(title), Some(id)) = (hit.title.as_deref(), hit.id) else {
                trace!(kind = ?block.kind, "entry without title or id skipped");
                continue;
            };
            if mask.fails(hit) {
                trace!(kind = ?block.kind, %id, "entry masked out");
                continue;
            }
            let normalized = normalize(title, true);
            candidates.push(Candidate::new(
                id,
                &normalized,
                score::ordinal(ordinal_set, ordinal_block),
            ));
            ordinal_set += 1;
        }
    }
    candidates
}

/// Highest score wins; a tie keeps the earlier listing position.
fn select_best(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        if best.map_or(true, |leader| candidate.score > leader.score) {
            best = Some(candidate);
        }
    }
    best
}
