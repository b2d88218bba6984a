//! Query state for a single resolution.
//!
//! A [`TitleQuery`] owns the raw title text plus the masking flags, and
//! memoizes every derived form (stripped seasons, normalized text,
//! compiled mask) so each is computed at most once no matter how many
//! resolution stages ask for it.

use kinodex_parse::{normalize, strip_seasons};

pub use kinodex_parse::{Episodes, SeasonMap};

use crate::mask::Mask;

#[derive(Debug, Clone)]
pub struct TitleQuery {
    raw: String,
    /// Apply category masking at all.
    pub mask_enabled: bool,
    /// Look for a video game instead of a film or show.
    pub video_game: bool,
    normalized: Option<String>,
    mask: Option<Mask>,
    seasons: Option<SeasonMap>,
}

impl TitleQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            mask_enabled: false,
            video_game: false,
            normalized: None,
            mask: None,
            seasons: None,
        }
    }

    /// The query text as it currently stands: as supplied, minus any
    /// spans season extraction has stripped.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized form of the title, computed on first use.
    ///
    /// Queries always normalize in extended mode: filler words carry no
    /// signal on the probing side.
    pub fn normalized_title(&mut self) -> &str {
        if self.normalized.is_none() {
            self.normalized = Some(normalize(&self.raw, true));
        }
        self.normalized.as_deref().unwrap_or_default()
    }

    /// Category mask for this query's flags, built on first use.
    pub fn mask(&mut self) -> &Mask {
        let enabled = self.mask_enabled;
        let game = self.video_game;
        self.mask.get_or_insert_with(|| Mask::for_flags(enabled, game))
    }

    /// Pull season and episode markers out of the title.
    ///
    /// The matched spans are stripped from the text later stages see,
    /// so "Show S02E04" goes on to resolve as "Show". Scanned once;
    /// repeat calls return the same map.
    pub fn seasons(&mut self) -> &SeasonMap {
        if self.seasons.is_none() {
            // Stripping rewrites the text, so a memoized normalization
            // is stale.
            self.normalized = None;
            self.seasons = Some(strip_seasons(&mut self.raw));
        }
        self.seasons.get_or_insert_with(SeasonMap::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MaskMode;

    #[test]
    fn normalization_is_stable_across_calls() {
        let mut query = TitleQuery::new("Some.Title.2003.XviD-GROUP");
        let first = query.normalized_title().to_owned();
        assert_eq!(first, "some title 2003");
        assert_eq!(query.normalized_title(), first);
    }

    #[test]
    fn raw_text_is_untouched_by_normalization() {
        let mut query = TitleQuery::new("The Movie (2011)");
        query.normalized_title();
        assert_eq!(query.raw(), "The Movie (2011)");
    }

    #[test]
    fn mask_follows_flags() {
        let mut query = TitleQuery::new("some game");
        query.mask_enabled = true;
        query.video_game = true;
        assert_eq!(query.mask().mode(), MaskMode::VideoGame);

        let mut plain = TitleQuery::new("some film");
        assert_eq!(plain.mask().mode(), MaskMode::None);
    }

    #[test]
    fn season_extraction_strips_the_query_text() {
        let mut query = TitleQuery::new("Show.Name.S02E04.HDTV.XviD");
        assert_eq!(query.seasons().len(), 1);
        assert!(query.seasons().get(2).is_some());
        assert_eq!(query.normalized_title(), "show name");
    }

    #[test]
    fn seasons_after_normalization_recompute_the_title() {
        let mut query = TitleQuery::new("Show.Name.S02E04.HDTV");
        assert_eq!(query.normalized_title(), "show name s02e04");
        query.seasons();
        assert_eq!(query.normalized_title(), "show name");
    }
}
