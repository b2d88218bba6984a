//! Release-name scrubbing.
//!
//! Takes a noisy torrent/release title ("Movie.Title.2011.BluRay.1080p.
//! x264-GROUP") and reduces it to the words that identify the work
//! ("movie title 2011"). The same routine, with `extended` off, is used
//! to put candidate titles from a catalog into comparable form.

use unicode_normalization::UnicodeNormalization;

use crate::noise::{NOISE_RULES, USELESS_WORDS};

/// Words shorter than this are dropped unless they carry a digit.
const MIN_WORD_LEN: usize = 2;

/// Scrub a title down to its identifying words.
///
/// The stages, in order:
/// 1. extended only: run the noise-rule table (see `noise`), each rule
///    feeding the next;
/// 2. NFKC fold, then replace every non-alphanumeric character with a
///    space;
/// 3. collapse whitespace runs, trim, lowercase;
/// 4. drop words below [`MIN_WORD_LEN`] that contain no digit, and, in
///    extended mode, members of the useless-word set.
///
/// The result is words joined by single spaces, possibly empty.
pub fn normalize(text: &str, extended: bool) -> String {
    let mut text = text.to_owned();
    if extended {
        for rule in NOISE_RULES.iter() {
            text = rule.apply(&text);
        }
    }

    let stripped: String = text
        .nfkc()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let collapsed = stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    collapsed
        .split(' ')
        .filter(|word| keep_word(word, extended))
        .collect::<Vec<_>>()
        .join(" ")
}

fn keep_word(word: &str, extended: bool) -> bool {
    if word.chars().count() < MIN_WORD_LEN {
        return word.chars().any(char::is_numeric);
    }
    !(extended && USELESS_WORDS.contains(word))
}
