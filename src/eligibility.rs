//! Eligibility rules: the non-numeric checks that veto a pairing.
//!
//! [`skip_reason`] is a pure predicate over two catalog entries and a
//! candidate score, evaluated before a match may enter the top-K heap.
//! Checks short-circuit in a fixed order; the first failure names the
//! reason, which the engine logs in verbose runs.
//!
//! Two rules are deliberately asymmetric: the promo guard (a promo target
//! is vetoed unless the source is itself a promo) and the one-way tag rule
//! (a target may not introduce a sensitive tag the source lacks, while the
//! source dropping one is fine). Swapping source and target can therefore
//! flip the verdict.

use std::fmt;

use crate::catalog::CatalogEntry;

/// Marker in a normalized English title that identifies promotional
/// one-shots. Matched case-insensitively as a substring.
const PROMO_MARKER: &str = "(promo)";

/// Sensitive tag identifiers subject to the one-way rule: a target may
/// only carry one of these if the source carries it too.
pub const ONE_WAY_TAG_IDS: &[&str] = &[
    "b11fda93-8f1d-4bef-b2ed-8803d3733170", // 4-Koma
    "b13b2a48-c720-44a9-9c77-39c9979373fb", // Doujinshi
    "b29d6a3d-1569-4e7a-8caf-7557bc92cd5d", // Gore
    "97893a4c-12af-4dac-b6be-0dffb353568e", // Sexual Violence
    "5920b825-4181-4a17-beeb-9918b0ff7a30", // Boys' Love
    "a3c67850-4684-404e-9b7f-c69850ee5da6", // Girls' Love
    "acc803a4-c95a-4c22-86fc-eb6b582d82a2", // Wuxia
    "2d1f5d56-a1e5-4d0d-a961-2193588b08ec", // Loli
    "ddefd648-5140-4e5f-ba18-4eca4071d19b", // Shota
    "5bd0e105-4481-44ca-b6e7-7544da56b1a3", // Incest
];

/// Why a candidate pairing was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Candidate score was zero or negative.
    InvalidScore,
    /// Target is the source itself.
    SameEntry,
    /// Source has languages but shares none with the target.
    NoCommonLanguages,
    /// One entry lists the other as related, in either direction.
    RelatedEntry,
    /// Source has a content rating and the target's differs.
    ContentRatingMismatch,
    /// Target is a promo title and the source is not.
    PromoTarget,
    /// Source has a demographic and the target's differs.
    DemographicMismatch,
    /// Target carries a sensitive tag the source lacks.
    OneWayTag,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::InvalidScore => "invalid score",
            SkipReason::SameEntry => "same entry",
            SkipReason::NoCommonLanguages => "no common languages",
            SkipReason::RelatedEntry => "related entry",
            SkipReason::ContentRatingMismatch => "content rating mismatch",
            SkipReason::PromoTarget => "promo target",
            SkipReason::DemographicMismatch => "demographic mismatch",
            SkipReason::OneWayTag => "one-way tag",
        };
        f.write_str(text)
    }
}

fn is_promo(entry: &CatalogEntry, language: &str) -> bool {
    entry
        .title_in(language)
        .is_some_and(|t| t.to_lowercase().contains(PROMO_MARKER))
}

/// Decide whether the pairing is invalid, and why.
///
/// Returns `None` for a valid pairing. `language` is the working language
/// key used for the promo-title check.
///
/// # Examples
///
/// ```
/// use semejar::catalog::CatalogEntry;
/// use semejar::eligibility::{skip_reason, SkipReason};
///
/// let a = CatalogEntry::new("a").with_title("en", "A").with_language("en");
/// let b = CatalogEntry::new("b").with_title("en", "B").with_language("en");
/// assert_eq!(skip_reason(0, &a, 1, &b, 0.5, "en"), None);
/// assert_eq!(
///     skip_reason(0, &a, 0, &a, 0.5, "en"),
///     Some(SkipReason::SameEntry)
/// );
/// ```
#[must_use]
pub fn skip_reason(
    source_idx: usize,
    source: &CatalogEntry,
    target_idx: usize,
    target: &CatalogEntry,
    score: f64,
    language: &str,
) -> Option<SkipReason> {
    if score <= 0.0 {
        return Some(SkipReason::InvalidScore);
    }
    if source_idx == target_idx {
        return Some(SkipReason::SameEntry);
    }
    if !source.available_translated_languages.is_empty() && !source.shares_language_with(target) {
        return Some(SkipReason::NoCommonLanguages);
    }
    match_validity(source, target, language)
}

/// The match-validity rule: relation, rating, promo, demographic, and the
/// one-way tag check, in that order.
fn match_validity(
    source: &CatalogEntry,
    target: &CatalogEntry,
    language: &str,
) -> Option<SkipReason> {
    if source.related_ids.contains(&target.id) || target.related_ids.contains(&source.id) {
        return Some(SkipReason::RelatedEntry);
    }

    if let Some(rating) = source.content_rating {
        if target.content_rating != Some(rating) {
            return Some(SkipReason::ContentRatingMismatch);
        }
    }

    if !is_promo(source, language) && is_promo(target, language) {
        return Some(SkipReason::PromoTarget);
    }

    if let Some(demographic) = source.publication_demographic {
        if target.publication_demographic != Some(demographic) {
            return Some(SkipReason::DemographicMismatch);
        }
    }

    // Explicit tiers match on rating alone, with no per-tag gating.
    if source
        .content_rating
        .is_some_and(crate::catalog::ContentRating::is_explicit)
    {
        return None;
    }

    for tag_id in ONE_WAY_TAG_IDS {
        if !source.has_tag(tag_id) && target.has_tag(tag_id) {
            return Some(SkipReason::OneWayTag);
        }
    }

    None
}
