use serde::Deserialize;

use kinodex_core::provider::{BlockKind, RawHit, ResultBlock, TitleId};

// ── Find endpoint response ───────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FindResponse {
    /// Canonical title link when the query resolved outright.
    pub canonical: Option<String>,
    #[serde(default)]
    pub sections: Vec<FindSection>,
}

#[derive(Debug, Deserialize)]
pub struct FindSection {
    pub label: String,
    #[serde(default)]
    pub entries: Vec<FindEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FindEntry {
    pub href: Option<String>,
    pub text: Option<String>,
    /// Trailing annotation after the title link, e.g. "(2008) (VG)".
    #[serde(default)]
    pub category: String,
}

// ── Decoding ─────────────────────────────────────────────────────

/// Decode a title link like "/title/tt0468569/" to its numeric id.
///
/// The first "tt" run followed by digits wins, so absolute URLs (whose
/// scheme also contains "tt") decode the same as relative ones. Links
/// to anything but a title yield `None`.
pub fn parse_title_href(href: &str) -> Option<TitleId> {
    let mut rest = href;
    while let Some(pos) = rest.find("tt") {
        let digits = &rest[pos + 2..];
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end > 0 {
            return digits[..end].parse().ok().map(TitleId);
        }
        rest = &rest[pos + 2..];
    }
    None
}

/// Map a section label to a result-block kind.
pub fn section_kind(label: &str) -> BlockKind {
    let label = label.to_lowercase();
    if label.contains("exact") {
        BlockKind::Exact
    } else if label.contains("tv") {
        BlockKind::TvRecommendation
    } else {
        BlockKind::Fuzzy
    }
}

impl FindEntry {
    pub fn into_raw_hit(self) -> RawHit {
        RawHit {
            id: self.href.as_deref().and_then(parse_title_href),
            title: self.text,
            category: self.category,
        }
    }
}

impl FindSection {
    pub fn into_result_block(self) -> ResultBlock {
        ResultBlock {
            kind: section_kind(&self.label),
            hits: self
                .entries
                .into_iter()
                .map(FindEntry::into_raw_hit)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_href() {
        assert_eq!(
            parse_title_href("/title/tt0468569/"),
            Some(TitleId(468_569))
        );
        assert_eq!(
            parse_title_href("https://www.imdb.com/title/tt10872600/?ref_=fn_al_tt_1"),
            Some(TitleId(10_872_600))
        );
        assert_eq!(parse_title_href("/name/nm0000122/"), None);
        assert_eq!(parse_title_href("/title/tt/"), None);
        assert_eq!(parse_title_href("little"), None);
        assert_eq!(parse_title_href(""), None);
    }

    #[test]
    fn test_section_kind_mapping() {
        assert_eq!(section_kind("Titles (Exact Matches)"), BlockKind::Exact);
        assert_eq!(section_kind("Titles (Partial Matches)"), BlockKind::Fuzzy);
        assert_eq!(section_kind("Popular Titles"), BlockKind::Fuzzy);
        assert_eq!(section_kind("TV Episodes"), BlockKind::TvRecommendation);
        assert_eq!(section_kind("Something New"), BlockKind::Fuzzy);
    }

    #[test]
    fn test_deserialize_find_listing() {
        let json = r#"{
            "canonical": null,
            "sections": [
                {
                    "label": "Titles (Exact Matches)",
                    "entries": [
                        { "href": "/title/tt0468569/", "text": "The Dark Knight", "category": "(2008)" },
                        { "href": "/title/tt1345836/", "text": "The Dark Knight Rises", "category": "(2012)" }
                    ]
                },
                {
                    "label": "Titles (Approx Matches)",
                    "entries": [
                        { "href": "/videogame/xyz", "text": "Batman", "category": "(2009) (VG)" }
                    ]
                }
            ]
        }"#;

        let resp: FindResponse = serde_json::from_str(json).unwrap();
        assert!(resp.canonical.is_none());
        assert_eq!(resp.sections.len(), 2);

        let blocks: Vec<ResultBlock> = resp
            .sections
            .into_iter()
            .map(FindSection::into_result_block)
            .collect();
        assert_eq!(blocks[0].kind, BlockKind::Exact);
        assert_eq!(blocks[0].hits[0].id, Some(TitleId(468_569)));
        assert_eq!(blocks[0].hits[0].title.as_deref(), Some("The Dark Knight"));
        assert_eq!(blocks[0].hits[1].category, "(2012)");

        // Undecodable href carries through as a hit without an id.
        assert_eq!(blocks[1].kind, BlockKind::Fuzzy);
        assert_eq!(blocks[1].hits[0].id, None);
    }

    #[test]
    fn test_deserialize_direct_hit() {
        let json = r#"{ "canonical": "/title/tt0137523/" }"#;
        let resp: FindResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.canonical.as_deref().and_then(parse_title_href),
            Some(TitleId(137_523))
        );
        assert!(resp.sections.is_empty());
    }
}
