//! Search provider abstraction.
//!
//! The resolver core is backend-agnostic: anything that can answer a
//! direct-match probe and a candidate search can drive it. Concrete
//! backends (the IMDb web client, test stubs) implement [`SearchProvider`].

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a catalog title.
///
/// Rendered in the canonical `tt`-prefixed zero-padded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleId(pub u64);

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tt{:07}", self.0)
    }
}

/// Which kind of result block a candidate came from.
///
/// Blocks arrive ordered best-first; the ordinal penalty applied during
/// scoring grows with the block position, so the kind itself only needs
/// to survive the trip for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Titles the provider itself considers exact matches.
    Exact,
    /// Partial, approximate and popular matches.
    Fuzzy,
    /// TV episode and series suggestions.
    TvRecommendation,
}

/// One entry of a result block, as close to the wire as practical.
///
/// Either field may be missing on malformed markup; the resolver skips
/// such entries instead of failing the whole search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHit {
    pub title: Option<String>,
    pub id: Option<TitleId>,
    /// Trailing category annotation, e.g. `(VG)`, verbatim.
    #[serde(default)]
    pub category: String,
}

/// An ordered group of hits of one kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBlock {
    pub kind: BlockKind,
    pub hits: Vec<RawHit>,
}

/// A backend that can search the title catalog.
///
/// `find_direct` asks whether the provider recognizes the query outright
/// (a redirect straight to a title page); `find_candidates` returns the
/// full result listing for local scoring.
pub trait SearchProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Probe for an immediate, unambiguous match.
    fn find_direct(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<TitleId>, Self::Error>> + Send;

    /// Fetch the ordered result blocks for a query.
    fn find_candidates(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ResultBlock>, Self::Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_id_renders_zero_padded() {
        assert_eq!(TitleId(468_569).to_string(), "tt0468569");
        assert_eq!(TitleId(7).to_string(), "tt0000007");
    }

    #[test]
    fn title_id_keeps_long_ids_intact() {
        assert_eq!(TitleId(10_872_600).to_string(), "tt10872600");
    }
}
