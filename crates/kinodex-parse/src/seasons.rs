//! Season and episode extraction from release names.
//!
//! Works on a private copy of the name and consumes it destructively:
//! every matched span is spliced out before the next scan, so repeated
//! tags ("4x02.4x03") are picked up one by one. A season marked as
//! fully covered never degrades back to an episode list.

use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// Episode coverage for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Episodes {
    /// The whole season.
    Full,
    /// Individual episode numbers.
    Numbered(BTreeSet<u32>),
}

/// Seasons referenced by a release name, keyed by season number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonMap {
    seasons: BTreeMap<u32, Episodes>,
}

impl SeasonMap {
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn get(&self, season: u32) -> Option<&Episodes> {
        self.seasons.get(&season)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Episodes)> {
        self.seasons.iter().map(|(season, eps)| (*season, eps))
    }

    fn mark_full(&mut self, season: u32) {
        self.seasons.insert(season, Episodes::Full);
    }

    fn add_episode(&mut self, season: u32, episode: u32) {
        match self.seasons.entry(season) {
            Entry::Occupied(mut covered) => {
                if let Episodes::Numbered(set) = covered.get_mut() {
                    set.insert(episode);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Episodes::Numbered(BTreeSet::from([episode])));
            }
        }
    }
}

// ── Patterns (compiled once) ────────────────────────────────────

/// "complete" marker, tolerating one symbol on either side.
const COMPLETE: &str = r"[^a-z0-9\s]?\s?(?:complete|hela)\s?[^a-z0-9\s]?";

/// Full-season references: a season word in several languages or the
/// compact "s01" form, with an optional range ("1-3", "1 to 3") or an
/// explicit list ("1, 2 and 5" / "s01,s02"), optionally flagged as
/// complete before or after.
static FULL_SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        concat!(
            r"(?i)",
            r"(?P<pre>{complete}\s?)?",
            r"(?:",
            r"(?:\b",
            r"(?:seasons?|säsong(?:er(?:na)?)?|saison(?:s)?|seizo(?:en)(?:en)?|staffeln?|temporadas?)",
            r"\s?0?(?P<lo1>\d\d?)",
            r"(?P<more1>",
            r"(?:\s?(?:-|to)\s?0?(?P<hi1>\d\d?))",
            r"|(?:\s?(?:and|,|;|&)\s?0?\d\d?)+",
            r")?",
            r")",
            r"|(?:\b",
            r"s0?(?P<lo2>\d\d?)",
            r"(?P<more2>",
            r"(?:-s?0?(?P<hi2>\d\d?))",
            r"|(?:[,;&\s]s0?\d\d?)+",
            r")?",
            r"\b)",
            r")",
            r"(?P<post>\s{complete})?"
        ),
        complete = COMPLETE,
    ))
    .unwrap()
});

/// Single-episode references: "S04E12", "4x02", optionally "E12-14".
static EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:s0?(?P<se1>\d\d?)e|0?(?P<se2>\d\d?)x)0?(?P<lo>\d\d?)(?:-0?(?P<hi>\d\d?))?\b",
    )
    .unwrap()
});

// ── Extraction ──────────────────────────────────────────────────

/// Extract the seasons and episodes a release name refers to.
///
/// Phase one looks for a full-season reference; a completeness marker
/// ends the scan there. Phase two repeatedly consumes episode tags.
/// Returns an empty map when the name carries no recognizable tags.
pub fn extract_seasons(name: &str) -> SeasonMap {
    let mut working = name.to_owned();
    strip_seasons(&mut working)
}

/// Same scan as [`extract_seasons`], but on the caller's string: every
/// matched span is spliced out, leaving a name that can go on to title
/// resolution without its season tags.
pub fn strip_seasons(text: &mut String) -> SeasonMap {
    let mut map = SeasonMap::default();

    if full_seasons(text, &mut map) {
        return map;
    }

    while let Some(hit) = take_episode(text) {
        trace!(season = hit.season, episode = hit.lower, "episode tag");
        let full = matches!(map.get(hit.season), Some(Episodes::Full));
        if !full {
            for episode in ordered(hit.lower, hit.upper.unwrap_or(hit.lower)) {
                map.add_episode(hit.season, episode);
            }
        }
    }

    map
}

/// Phase one. Returns true when a completeness marker was present,
/// meaning the caller can stop looking for individual episodes.
fn full_seasons(working: &mut String, map: &mut SeasonMap) -> bool {
    let (span, complete, lower, upper, list) = {
        let caps = match FULL_SEASON.captures(working) {
            Some(caps) => caps,
            None => return false,
        };
        let span = caps.get(0).map_or(0..0, |m| m.range());
        let complete = caps.name("pre").is_some() || caps.name("post").is_some();
        let lower: Option<u32> = caps
            .name("lo1")
            .or_else(|| caps.name("lo2"))
            .and_then(|m| m.as_str().parse().ok());
        let upper: Option<u32> = caps
            .name("hi1")
            .or_else(|| caps.name("hi2"))
            .and_then(|m| m.as_str().parse().ok());
        let list = caps
            .name("more1")
            .or_else(|| caps.name("more2"))
            .map(|m| m.as_str().to_owned());
        (span, complete, lower, upper, list)
    };
    splice(working, span);

    if let Some(lower) = lower {
        trace!(lower, upper, complete, "full season tag");
        if let Some(upper) = upper {
            for season in ordered(lower, upper) {
                map.mark_full(season);
            }
        } else if let Some(list) = list {
            map.mark_full(lower);
            for season in list
                .split(|c: char| !c.is_ascii_digit())
                .filter(|part| !part.is_empty())
                .filter_map(|part| part.parse().ok())
            {
                map.mark_full(season);
            }
        } else {
            map.mark_full(lower);
        }
    }

    complete
}

struct EpisodeHit {
    season: u32,
    lower: u32,
    upper: Option<u32>,
}

/// Phase two step: find one episode tag, splice it out of the name.
fn take_episode(working: &mut String) -> Option<EpisodeHit> {
    loop {
        let (span, season, lower, upper) = {
            let caps = EPISODE.captures(working)?;
            let span = caps.get(0).map_or(0..0, |m| m.range());
            let season: Option<u32> = caps
                .name("se1")
                .or_else(|| caps.name("se2"))
                .and_then(|m| m.as_str().parse().ok());
            let lower: Option<u32> = caps.name("lo").and_then(|m| m.as_str().parse().ok());
            let upper: Option<u32> = caps.name("hi").and_then(|m| m.as_str().parse().ok());
            (span, season, lower, upper)
        };
        splice(working, span);

        // Unparsable digits: the span is consumed either way, scan on.
        if let (Some(season), Some(lower)) = (season, lower) {
            return Some(EpisodeHit { season, lower, upper });
        }
    }
}

/// Replace `span` with a single space, joining what surrounds it.
fn splice(text: &mut String, span: Range<usize>) {
    let mut next = String::with_capacity(text.len());
    next.push_str(&text[..span.start]);
    next.push(' ');
    next.push_str(&text[span.end..]);
    *text = next;
}

/// Inclusive range with the bounds swapped into order when needed.
fn ordered(a: u32, b: u32) -> std::ops::RangeInclusive<u32> {
    if a > b {
        b..=a
    } else {
        a..=b
    }
}
