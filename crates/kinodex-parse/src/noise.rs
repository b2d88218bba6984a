use regex::Regex;
use std::sync::LazyLock;

/// One entry of the scrub table: a compiled pattern and its replacement.
///
/// Replacements keep a single space so neighbouring words never fuse;
/// the whitespace collapse later in the pipeline flattens the leftovers.
pub(crate) struct NoiseRule {
    pattern: Regex,
    replacement: &'static str,
}

impl NoiseRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Case-insensitive literal, replaced by a space.
    fn literal(text: &str) -> Self {
        Self::new(&format!("(?i){}", regex::escape(text)), " ")
    }

    pub(crate) fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

// ── Pattern fragments ───────────────────────────────────────────

/// Two/three-letter language tags seen in scene names.
const LANG_TAGS: &str = "swe|eng|ita|nl|fr[ae]?|spa|es|bo?s|p(?:t|or)|bg|gre\
|dan?|fin|estsub|ice|in?d|heb?|ara|jpn|nor?|ro|ru|tr|ger|pl|hindi";

/// Spelled-out language and country words, bracketed blocks only.
const LANG_NAMES: &str = "greek|arabic|bengal[ia]|urdu|malay\
|(?:francai|nederland)s\
|(?:hind|punjab|[fp]ars|hindustan)i\
|(?:mandari|(?:(?:arab|(?:per|malay)s|russ|(?:beng|it)al)i|germ)a)n\
|(?:fren|dut)ch\
|(?:japan|portugu|chin)ese\
|(?:dan|swed|span|engl|turk|pol)ish";

/// Internet TLDs and torrent-site fillers, bracketed blocks only.
const SITE_TOKENS: &str = r"org|com|net|info|tv|biz|edu|mil|gov|bt|\{a-z\}|\w*torrent";

/// Release groups that ride on the tail of a codec tag. Case-sensitive.
const RELEASE_GROUPS: &str = concat!(
    r"MAX|PrisM|CAMELOT|BiA|RaDiuS|DiAMOND|FQM|M00DY|ARiGOLD|FxM|METiS",
    r"|SecretMyth|2HD|DEViSE|MAXSPEED|SYS|VoMiT|DaRkFib3r|GFW|SiLENT",
    r"|ExtraScene|V2|CATCH|Skvaguratet|LAP|ViSiON|Regenzy|NiN|NoName",
    r"|DivxMonkey|LW|nEHAL|Megaplay|TRL|NeDiVx|IMAGiNE|3Li|Gopo|PROJECT1",
    r"|CPY|iMBT|AMIABLE|TEA|ARROW|APOCALYP|TLF|BeStDivX|CiNEFiLE|RED",
    r"|SiNNERS|NhaNc3|fov|TEAM|IMMERSE|GFM|WiKi|NEPTUNE(?:\(Murlok\))?|FoV",
    r"|CtrlHD|La(?:nza(?:Mp(?:3\.CoM)?)?)?|CBGB|ORENJi|PerfectionHD|AToM",
    r"|\*?FROSTY\*?|LOL"
);

/// Source/quality markers shared by several rules.
fn common_tokens() -> String {
    format!(
        concat!(
            r"(?:hd|tv|dvb|sat|vhs)[-\s]?rip",
            r"|(?:{lang}|multi)[-\s]subs?",
            r"|tele(?:sync|cine)",
            r"|(?:no[-\s]?)?rar",
            r"|multi[-\s]?cam?",
            r"|(?:720|1080)[ip]",
            r"|[hp]dtv",
            r"|mpe?g[-\s]?[1-4]",
            r"|workprint|readnfo|hdclassics|screener",
            r"|5[.\s]1ch",
            r"|ac3(?:\(dd(?:\s?\d\.\d)?\))?",
            r"|dd\d\.\d",
            r"|avc(?:hd)?",
            r"|vol\.\d\d?",
            r"|high\s?quality",
            r"|music\s?video",
            r"|eztv"
        ),
        lang = LANG_TAGS,
    )
}

/// Everything in `common_tokens` plus containers, codecs and devices.
fn extended_tokens() -> String {
    format!(
        concat!(
            r"mkv|divx|xvid|avi|mp[34]|[hx]264",
            r"|flac|ogg|aac|dts|dolby|\w+hd",
            r"|6ch|kbps|zip|iso|ntsc|[cs]vcd",
            r"|r5|cam|wp|ts|dxva|proper",
            r"|scr|h[dq]|ddc|wmw|secam|pal(?:-(?:b|g|d|k|i|m|l|nc?))?",
            r"|ipod|iph?one|zune|psp|ps[23]|(?:fl|[mf]4)v",
            r"|{common}",
            r"|ts(?:\.xvid\.\w+)?",
            r"|dvd(?:scr(?:eener)?|[-\s]?(?:rip|ram|rw2|d)|[-+\s]?rw?(?:\s?dl)?|s|\d)?",
            r"|cd(?:[-\s]?(?:rip|rom|rw?)|\+g)?",
            r"|b(?:d[-\s]?(?:rip|re?)|r[-\s]?rip|lu[-\s]?ray(?:[-\s]?rip)?)"
        ),
        common = common_tokens(),
    )
}

// ── The scrub table (compiled once) ─────────────────────────────

/// Ordered substitution table applied before symbol stripping in
/// extended mode. Each rule feeds the next.
pub(crate) static NOISE_RULES: LazyLock<Vec<NoiseRule>> = LazyLock::new(|| {
    let extended = extended_tokens();

    vec![
        NoiseRule::literal("WiNetwork-bt"),
        NoiseRule::new(r"(?i)crazy[-.]torrent", " "),
        // "(2011.restored)" keeps the year, drops the annotation.
        NoiseRule::new(r"\((\d+)[.\-+][[:alnum:]]+\)", " $1 "),
        // Bracketed or parenthesised blocks made up entirely of tags:
        // "[DivX-ITA.Dvdrip]", "(Multi-Sub torrent.org)" and friends.
        NoiseRule::new(
            &format!(
                concat!(
                    r"(?i)[\[(]",
                    r"(?:[[:alnum:]]*[+.\s-])*",
                    r"\d*",
                    r"(?:{site}|(?:{lang})|{names}|{extended})",
                    r"\d*",
                    r"(?:[+.\s-][[:alnum:]]*)*",
                    r"(?:$|[\])])"
                ),
                site = SITE_TOKENS,
                lang = LANG_TAGS,
                names = LANG_NAMES,
                extended = extended,
            ),
            " ",
        ),
        // Codec tag with a trailing release group: "x264-LOL". The group
        // roster is matched case-sensitively; an unlisted group is only
        // taken when glued to a video codec tag with a symbol, so a
        // title word merely ending in a tag ("Cats", "Webcam") survives.
        NoiseRule::new(
            &format!(
                concat!(
                    r"\b(?:",
                    r"\d*(?i:{extended})\d*",
                    r"(?:[+.-]\d+)?",
                    r"[+.\s-](?:{groups})",
                    r"|(?i:[hx]26[45]|xvid|divx)",
                    r"[+.-][[:alnum:]]+",
                    r")"
                ),
                extended = extended,
                groups = RELEASE_GROUPS,
            ),
            " ",
        ),
        // Free-standing source/quality markers; uppercase-only forms stay
        // case-sensitive so "cam" inside a word survives.
        NoiseRule::new(
            &format!(
                concat!(
                    r"(?i){common}",
                    r"|\d?dvd(?:scr(?:eener)?|[-\s]?(?:rip|ram|rw2|d)|[-+\s]?rw?(?:\s?dl)?|s|\d)?",
                    r"|\d?cd(?:[-\s]?(?:rip|rom)|\+g|-rw?|\d)",
                    r"|b(?:d(?:[-\s]?rip|-re?)|r[-\s]?rip|lu[-\s]?ray(?:[-\s]?rip)?)",
                    r"|(?-i:P(?:ROPER|AL)|TS|H[QD]|ZIP|WP|SCR|CAM|WEB[-.\s]?DL|[CB]D\s?RE?|UNRATED)",
                    r"|\*uncensored\*"
                ),
                common = common_tokens(),
            ),
            " ",
        ),
    ]
});

/// Words dropped outright in extended mode, after symbol stripping.
pub(crate) static USELESS_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "mkv", "divx", "xvid", "avi", "mp4",
    "h264", "x264", "svcd", "r5", "m4v",
    "mp3", "flac", "ogg", "aac", "f4v",
    "dolby", "dts", "6ch", "kbps", "flv",
    "iso", "ntsc", "cvcd", "dxva", "secam",
    "ipod", "iphone", "zune", "psp", "ps3",
    "ps2",
};
