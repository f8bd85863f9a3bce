//! Suffix-stripping stemmer used by the text normalizers.
//!
//! A streamlined Porter stemmer: steps 1a/1b/1c for plurals and participles,
//! sequential rule tables for the common derivational suffixes, and the
//! measure-gated long-word rules. Both the title and description normalizers
//! stem every token, and the stop-word list for the description space is
//! stemmed with the same rules, so all three stay in one vocabulary.
//!
//! # Examples
//!
//! ```
//! use semejar::text::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("categories"), "categori");
//!
//! // Words of one or two characters pass through unchanged.
//! assert_eq!(stemmer.stem("is"), "is");
//! ```
//!
//! # References
//!
//! Porter, M.F. (1980). "An algorithm for suffix stripping."
//! Program, 14(3), 130-137.

/// Step 2 suffix rewrites, applied in sequence when the remaining stem has
/// measure > 0.
const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

/// Step 3 suffix rewrites, same gating as step 2.
const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 suffixes, stripped outright from long words (measure > 1). Order
/// matters: "ement" must win over "ment", "ment" over "ent".
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Simplified Porter stemmer.
///
/// Stateless; construct once and reuse freely.
///
/// # Examples
///
/// ```
/// use semejar::text::PorterStemmer;
///
/// let stemmer = PorterStemmer::new();
/// assert_eq!(stemmer.stem("descriptions"), "descript");
/// assert_eq!(stemmer.stem("Played"), "plai");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new stemmer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Stem a single word. Lowercases first; words of two characters or
    /// fewer are returned as-is.
    #[must_use]
    pub fn stem(&self, word: &str) -> String {
        let mut word = word.to_lowercase();
        if word.len() <= 2 {
            return word;
        }

        // Step 1a: plurals
        if word.ends_with("sses") || word.ends_with("ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with("ss") {
            // keep
        } else if word.ends_with('s') && word.len() > 1 {
            word.truncate(word.len() - 1);
        }

        // Step 1b: -eed, -ed, -ing
        let mut trimmed_participle = false;
        if word.ends_with("eed") {
            let stem = &word[..word.len() - 3];
            if measure(stem) > 0 {
                word.truncate(word.len() - 1);
            }
        } else if word.ends_with("ed") {
            let stem = &word[..word.len() - 2];
            if stem.chars().any(is_vowel) {
                word.truncate(word.len() - 2);
                trimmed_participle = true;
            }
        } else if word.ends_with("ing") {
            let stem = &word[..word.len() - 3];
            if stem.chars().any(is_vowel) {
                word.truncate(word.len() - 3);
                trimmed_participle = true;
            }
        }

        // Step 1b cleanup after removing -ed/-ing
        if trimmed_participle {
            if word.ends_with("at") || word.ends_with("bl") || word.ends_with("iz") {
                word.push('e');
            } else if ends_with_double_consonant(&word)
                && !word.ends_with('l')
                && !word.ends_with('s')
                && !word.ends_with('z')
            {
                word.pop();
            } else if measure(&word) == 1 && ends_with_cvc(&word) {
                word.push('e');
            }
        }

        // Step 1c: terminal y after a vowel becomes i
        if word.ends_with('y') && word.len() > 1 {
            let stem = &word[..word.len() - 1];
            if stem.chars().any(is_vowel) {
                word.truncate(word.len() - 1);
                word.push('i');
            }
        }

        for (suffix, replacement) in STEP2_RULES {
            word = replace_suffix(&word, suffix, replacement);
        }
        for (suffix, replacement) in STEP3_RULES {
            word = replace_suffix(&word, suffix, replacement);
        }

        step4(&mut word);

        // Step 5a: drop a trailing e unless it protects a short stem
        if word.ends_with('e') {
            let stem = &word[..word.len() - 1];
            let m = measure(stem);
            if m > 1 || (m == 1 && !ends_with_cvc(stem)) {
                word.truncate(word.len() - 1);
            }
        }

        // Step 5b: double l collapses in long words
        if word.ends_with("ll") && measure(&word) > 1 {
            word.pop();
        }

        word
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// The "measure" of a word: the number of vowel-to-consonant transitions,
/// roughly its syllable count. "tree" = 0, "trouble" = 1, "troubles" = 2.
fn measure(word: &str) -> usize {
    let mut count = 0;
    let mut prev_is_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if !vowel && prev_is_vowel {
            count += 1;
        }
        prev_is_vowel = vowel;
    }
    count
}

fn ends_with_double_consonant(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), Some(second_last)) => !is_vowel(last) && last == second_last,
        _ => false,
    }
}

/// Consonant-vowel-consonant ending where the final consonant is not w, x,
/// or y. Such stems keep their silent e.
fn ends_with_cvc(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(last), Some(middle), Some(first)) => {
            !is_vowel(last)
                && is_vowel(middle)
                && !is_vowel(first)
                && !matches!(last, 'w' | 'x' | 'y')
        }
        _ => false,
    }
}

/// Replace `suffix` with `replacement` when the remaining stem has
/// measure > 0; otherwise return the word unchanged.
fn replace_suffix(word: &str, suffix: &str, replacement: &str) -> String {
    if let Some(stem) = word.strip_suffix(suffix) {
        if measure(stem) > 0 {
            return format!("{stem}{replacement}");
        }
    }
    word.to_string()
}

/// Step 4: strip the first matching long-word suffix. "ion" only comes off
/// after s or t.
fn step4(word: &mut String) {
    if measure(word) <= 1 {
        return;
    }
    for suffix in STEP4_SUFFIXES {
        if !word.ends_with(suffix) {
            continue;
        }
        if *suffix == "ion" {
            let stem_len = word.len() - 3;
            if stem_len > 0 && matches!(word.as_bytes()[stem_len - 1], b's' | b't') {
                word.truncate(stem_len);
            }
        } else {
            word.truncate(word.len() - suffix.len());
        }
        return;
    }
}
