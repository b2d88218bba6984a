//! Category masks.
//!
//! Search results carry a trailing annotation like `(TV)` or `(VG)`.
//! Depending on what the caller is looking for, some categories must be
//! present and others must be absent; a mask bundles those requirements
//! so candidate collection can apply them uniformly.

use std::sync::LazyLock;

use regex::Regex;

use crate::provider::RawHit;

static CATEGORY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(([a-z]+)\)").unwrap());

/// How strictly result categories are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskMode {
    /// Everything passes.
    #[default]
    None,
    /// Films and shows: video-game results are rejected.
    Video,
    /// Video games only.
    VideoGame,
}

impl MaskMode {
    /// Stable numeric form used as part of lookup-store keys.
    pub fn as_db_int(self) -> i64 {
        match self {
            MaskMode::None => 0,
            MaskMode::Video => 1,
            MaskMode::VideoGame => 2,
        }
    }
}

/// One requirement: a category tag that must (or must not) appear.
#[derive(Debug, Clone)]
struct MaskRule {
    /// `true` rejects hits carrying the tag; `false` rejects hits
    /// missing it.
    exclude: bool,
    tag: &'static str,
}

/// Compiled category filter for one query.
#[derive(Debug, Clone, Default)]
pub struct Mask {
    mode: MaskMode,
    rules: Vec<MaskRule>,
}

impl Mask {
    /// Build the mask for a query's flags.
    ///
    /// Masking only applies when the caller wants it (`enabled`); the
    /// `game` flag then picks between the video and video-game variants.
    pub fn for_flags(enabled: bool, game: bool) -> Self {
        if !enabled {
            return Self::default();
        }
        if game {
            Self {
                mode: MaskMode::VideoGame,
                rules: vec![MaskRule { exclude: false, tag: "VG" }],
            }
        } else {
            Self {
                mode: MaskMode::Video,
                rules: vec![MaskRule { exclude: true, tag: "VG" }],
            }
        }
    }

    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    /// Whether a hit violates any rule of this mask.
    ///
    /// Rules are checked in order and the first violation wins; with no
    /// rules nothing can fail.
    pub fn fails(&self, hit: &RawHit) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let tag = CATEGORY_TAG
            .captures(&hit.category)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase());
        for rule in &self.rules {
            let has = tag.as_deref() == Some(rule.tag);
            if (rule.exclude && has) || (!rule.exclude && !has) {
                return true;
            }
        }
        false
    }
}
