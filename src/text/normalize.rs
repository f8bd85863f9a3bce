//! Title, description, and tag normalizers.
//!
//! Three cleanup pipelines feed the vector spaces:
//!
//! - [`normalize_title`]: ASCII letters/digits/spaces only, stemmed.
//! - [`normalize_description`]: the heavy pipeline — accent stripping,
//!   markup/URL/email removal, contraction expansion, truncation at a
//!   foreign-language restatement, stemming.
//! - [`normalize_tag`]: ASCII letters/digits only, nothing else.
//!
//! Two quirks are contractual and must not be "fixed": a whitespace-only
//! title maps to a single space, and token boundaries at the ends of the
//! cleaned string survive as leading/trailing spaces in the output. The
//! fixtures in `normalize_tests.rs` pin both down.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::text::stem::PorterStemmer;

/// Language names that signal a second-language restatement of the same
/// description. Text from the marker onward is dropped; only the working
/// English portion is kept. Accent-stripped spellings because the marker
/// scan runs after Unicode normalization.
const FOREIGN_MARKERS: &[&str] = &[
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Russian",
    "Japanese",
    "Chinese",
    "Korean",
    "Indonesian",
    "Polish",
    "Turkish",
    "Arabic",
    "Vietnamese",
    "Thai",
    "Espanol",
    "Francais",
    "Portugues",
    "Deutsch",
    "Italiano",
];

/// Contractions expanded before apostrophes are stripped with the rest of
/// the symbols. Keys are matched case-insensitively.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("shouldn't", "should not"),
    ("wouldn't", "would not"),
    ("won't", "will not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("let's", "let us"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("you'll", "you will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("we'll", "we will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("they'll", "they will"),
];

/// A description that opens with a URL is a link dump, not a description;
/// the whole string is replaced by a single space.
static RE_LEADING_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*https?://.*").expect("invalid RE_LEADING_URL"));

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("invalid RE_EMAIL")
});

static RE_HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("invalid RE_HTML_TAG"));

/// BBCode tags and bracketed asides, content included.
static RE_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("invalid RE_BRACKET"));

static RE_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(\s*source\s*:[^)]*\)").expect("invalid RE_SOURCE"));

/// An "English:" label restates the working language; the label itself is
/// noise but the text after it is kept.
static RE_ENGLISH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"English\s*:").expect("invalid RE_ENGLISH_LABEL"));

/// Foreign-language section start: a known language name followed by a
/// colon or bracket, or sitting right after a blank line.
static RE_FOREIGN_SECTION: Lazy<Regex> = Lazy::new(|| {
    let names = FOREIGN_MARKERS.join("|");
    Regex::new(&format!(
        r"(?:\r?\n[ \t]*\r?\n\s*(?:{names})\b)|(?:\b(?:{names})\s*[:\[])"
    ))
    .expect("invalid RE_FOREIGN_SECTION")
});

static RE_CONTRACTION: Lazy<Regex> = Lazy::new(|| {
    let keys: Vec<String> = CONTRACTIONS
        .iter()
        .map(|(from, _)| regex::escape(from))
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})", keys.join("|"))).expect("invalid RE_CONTRACTION")
});

static RE_SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"  +").expect("invalid RE_SPACE_RUN"));

/// Decompose to NFKD and drop combining marks: "Café" -> "Cafe".
fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Expand contractions through the fixed table, preserving nothing of the
/// original casing (all replacement text is lowercase).
fn expand_contractions(text: &str) -> String {
    RE_CONTRACTION
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let matched = caps[0].to_lowercase();
            CONTRACTIONS
                .iter()
                .find(|(from, _)| *from == matched)
                .map_or(matched.clone(), |(_, to)| (*to).to_string())
        })
        .into_owned()
}

/// Stem each space-delimited token and rejoin with single spaces. Empty
/// tokens at the boundaries pass through, which is how leading/trailing
/// spaces survive the pipeline.
fn stem_tokens(text: &str) -> String {
    let stemmer = PorterStemmer::new();
    text.split(' ')
        .map(|token| stemmer.stem(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a title: ASCII letters, digits, and spaces only, stemmed and
/// lowercased.
///
/// Non-space whitespace is converted to a space rather than dropped, so a
/// whitespace-only title maps to a single space while a fully non-ASCII
/// title maps to the empty string.
///
/// # Examples
///
/// ```
/// use semejar::text::normalize_title;
///
/// assert_eq!(normalize_title("The Long Voyage"), "the long voyag");
/// assert_eq!(normalize_title("日本語"), "");
/// assert_eq!(normalize_title("   "), " ");
/// ```
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();
    let collapsed = RE_SPACE_RUN.replace_all(&kept, " ");
    stem_tokens(&collapsed)
}

/// Normalize a description through the full cleanup pipeline.
///
/// Stages, in order: accent stripping, leading-URL wipe, email removal,
/// HTML tag removal, truncation at a foreign-language section, "English:"
/// label removal, bracket-tag removal, "(source: ...)" removal, contraction
/// expansion, whitespace flattening, symbol removal, space collapsing, and
/// per-token stemming.
///
/// # Examples
///
/// ```
/// use semejar::text::normalize_description;
///
/// assert_eq!(
///     normalize_description("This is a test description."),
///     "thi is a test descript"
/// );
/// assert_eq!(
///     normalize_description("I don't think it's fair."),
///     "i do not think it is fair"
/// );
/// ```
#[must_use]
pub fn normalize_description(description: &str) -> String {
    let text = description.replace(['\u{2018}', '\u{2019}'], "'");
    let text = strip_accents(&text);
    let text = RE_LEADING_URL.replace(&text, " ");
    let text = RE_EMAIL.replace_all(&text, "");
    let text = RE_HTML_TAG.replace_all(&text, " ");
    let text = match RE_FOREIGN_SECTION.find(&text) {
        Some(m) => &text.as_ref()[..m.start()],
        None => text.as_ref(),
    };
    let text = RE_ENGLISH_LABEL.replace_all(text, "");
    let text = RE_BRACKET.replace_all(&text, "");
    let text = RE_SOURCE.replace_all(&text, "");
    let text = expand_contractions(&text);
    let kept: String = text
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();
    let collapsed = RE_SPACE_RUN.replace_all(&kept, " ");
    stem_tokens(&collapsed)
}

/// Normalize a tag name: ASCII letters and digits only.
///
/// No stemming and no lowercasing; the tag vectorizer lowercases downstream.
///
/// # Examples
///
/// ```
/// use semejar::text::normalize_tag;
///
/// assert_eq!(normalize_tag("4-Koma"), "4Koma");
/// assert_eq!(normalize_tag("Sexual Violence"), "SexualViolence");
/// ```
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
