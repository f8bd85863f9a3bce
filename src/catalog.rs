//! Catalog input model.
//!
//! A [`CatalogEntry`] is one serialized work as materialized by the caller:
//! multilingual title/description maps, tags, related-entry links, and the
//! set of translated languages. Entries are immutable for the duration of a
//! run; the engine never mutates or retains them beyond the run.
//!
//! The serde field names follow the camelCase wire format of the upstream
//! catalog (`altTitles`, `availableTranslatedLanguages`, ...), so a JSON dump
//! of catalog records deserializes directly.

use std::collections::HashMap;

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

/// Content rating tiers, most permissive to most explicit.
///
/// The upstream catalog stores the rating as a lowercase string and treats an
/// empty string as "not rated"; that empty tier maps to `None` on
/// [`CatalogEntry::content_rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRating {
    Safe,
    Suggestive,
    Erotica,
    Pornographic,
}

impl ContentRating {
    /// The two most explicit tiers skip the one-way tag rule entirely during
    /// eligibility checks.
    #[must_use]
    pub fn is_explicit(self) -> bool {
        matches!(self, ContentRating::Erotica | ContentRating::Pornographic)
    }
}

/// Publication demographic, empty tier mapped to `None` like the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    Shounen,
    Shoujo,
    Josei,
    Seinen,
}

/// A tag attached to a catalog entry: stable identifier plus a multilingual
/// name map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub id: String,
    #[serde(default)]
    pub name: HashMap<String, String>,
}

impl TagRef {
    /// Create a tag with a single name in the given language.
    pub fn new(id: impl Into<String>, language: &str, name: &str) -> Self {
        let mut names = HashMap::new();
        names.insert(language.to_string(), name.to_string());
        Self {
            id: id.into(),
            name: names,
        }
    }
}

/// One serialized work in the catalog.
///
/// Title and description are `Option` because the upstream store can hold
/// null maps; entries missing either are excluded from the corpus rather
/// than treated as errors.
///
/// # Examples
///
/// ```
/// use semejar::catalog::{CatalogEntry, ContentRating};
///
/// let entry = CatalogEntry::new("a1")
///     .with_title("en", "The Long Voyage")
///     .with_description("en", "A crew sails beyond the edge of the map.")
///     .with_language("en")
///     .with_rating(ContentRating::Safe);
/// assert_eq!(entry.title_in("en"), Some("The Long Voyage"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub title: Option<HashMap<String, String>>,
    #[serde(default)]
    pub alt_titles: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub description: Option<HashMap<String, String>>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub content_rating: Option<ContentRating>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub publication_demographic: Option<Demographic>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub related_ids: Vec<String>,
    #[serde(default)]
    pub available_translated_languages: Vec<String>,
    #[serde(default)]
    pub last_chapter: Option<String>,
}

impl CatalogEntry {
    /// Create an empty entry with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title for one language.
    #[must_use]
    pub fn with_title(mut self, language: &str, title: &str) -> Self {
        self.title
            .get_or_insert_with(HashMap::new)
            .insert(language.to_string(), title.to_string());
        self
    }

    /// Add an alternative title in one language.
    #[must_use]
    pub fn with_alt_title(mut self, language: &str, title: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(language.to_string(), title.to_string());
        self.alt_titles.push(map);
        self
    }

    /// Set the description for one language.
    #[must_use]
    pub fn with_description(mut self, language: &str, description: &str) -> Self {
        self.description
            .get_or_insert_with(HashMap::new)
            .insert(language.to_string(), description.to_string());
        self
    }

    /// Set the content rating.
    #[must_use]
    pub fn with_rating(mut self, rating: ContentRating) -> Self {
        self.content_rating = Some(rating);
        self
    }

    /// Set the publication demographic.
    #[must_use]
    pub fn with_demographic(mut self, demographic: Demographic) -> Self {
        self.publication_demographic = Some(demographic);
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add an available translated language.
    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        self.available_translated_languages
            .push(language.to_string());
        self
    }

    /// Add a related-entry identifier.
    #[must_use]
    pub fn with_related(mut self, id: impl Into<String>) -> Self {
        self.related_ids.push(id.into());
        self
    }

    /// Title in the given language, if present.
    #[must_use]
    pub fn title_in(&self, language: &str) -> Option<&str> {
        self.title
            .as_ref()
            .and_then(|m| m.get(language))
            .map(String::as_str)
    }

    /// Description in the given language, if present.
    #[must_use]
    pub fn description_in(&self, language: &str) -> Option<&str> {
        self.description
            .as_ref()
            .and_then(|m| m.get(language))
            .map(String::as_str)
    }

    /// Whether the entry carries the given tag identifier.
    #[must_use]
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    /// Exact language overlap check. The bitmask index approximates this;
    /// eligibility re-checks it here as the source of truth.
    #[must_use]
    pub fn shares_language_with(&self, other: &CatalogEntry) -> bool {
        self.available_translated_languages
            .iter()
            .any(|l| other.available_translated_languages.contains(l))
    }
}

/// Deserialize an optional enum field where the upstream store uses an empty
/// string for "absent" alongside plain JSON null.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => T::deserialize(s.into_deserializer()).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "f7888782-0727-49b0-95ec-a3530c70f83b",
            "title": {"en": "Example"},
            "altTitles": [{"ja": "例"}, {"en": "Sample"}],
            "lastChapter": "42",
            "availableTranslatedLanguages": ["en", "fr"],
            "relatedIds": ["e56a163f-1a4c-400b-8c1d-6cb98e63ce04"],
            "description": {"en": "A description."},
            "publicationDemographic": "seinen",
            "contentRating": "safe",
            "tags": [{"id": "t1", "name": {"en": "Action"}}]
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).expect("deserialize");
        assert_eq!(entry.id, "f7888782-0727-49b0-95ec-a3530c70f83b");
        assert_eq!(entry.title_in("en"), Some("Example"));
        assert_eq!(entry.alt_titles.len(), 2);
        assert_eq!(entry.last_chapter.as_deref(), Some("42"));
        assert_eq!(entry.available_translated_languages, vec!["en", "fr"]);
        assert_eq!(entry.content_rating, Some(ContentRating::Safe));
        assert_eq!(entry.publication_demographic, Some(Demographic::Seinen));
        assert!(entry.has_tag("t1"));
    }

    #[test]
    fn test_deserialize_empty_rating_as_none() {
        let json = r#"{"id": "x", "contentRating": "", "publicationDemographic": ""}"#;
        let entry: CatalogEntry = serde_json::from_str(json).expect("deserialize");
        assert_eq!(entry.content_rating, None);
        assert_eq!(entry.publication_demographic, None);
    }

    #[test]
    fn test_deserialize_null_title() {
        let json = r#"{"id": "x", "title": null, "description": null}"#;
        let entry: CatalogEntry = serde_json::from_str(json).expect("deserialize");
        assert!(entry.title.is_none());
        assert!(entry.description.is_none());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let entry: CatalogEntry = serde_json::from_str(r#"{"id": "x"}"#).expect("deserialize");
        assert_eq!(entry.id, "x");
        assert!(entry.tags.is_empty());
        assert!(entry.available_translated_languages.is_empty());
    }

    #[test]
    fn test_unknown_rating_is_rejected() {
        let json = r#"{"id": "x", "contentRating": "weird"}"#;
        assert!(serde_json::from_str::<CatalogEntry>(json).is_err());
    }

    #[test]
    fn test_is_explicit() {
        assert!(ContentRating::Erotica.is_explicit());
        assert!(ContentRating::Pornographic.is_explicit());
        assert!(!ContentRating::Safe.is_explicit());
        assert!(!ContentRating::Suggestive.is_explicit());
    }

    #[test]
    fn test_shares_language_with() {
        let a = CatalogEntry::new("a").with_language("en").with_language("fr");
        let b = CatalogEntry::new("b").with_language("fr");
        let c = CatalogEntry::new("c").with_language("de");
        assert!(a.shares_language_with(&b));
        assert!(!a.shares_language_with(&c));
        assert!(!c.shares_language_with(&a));
    }

    #[test]
    fn test_builder_round_trip() {
        let entry = CatalogEntry::new("a1")
            .with_title("en", "Title")
            .with_alt_title("en", "Alt")
            .with_description("en", "Desc")
            .with_rating(ContentRating::Suggestive)
            .with_demographic(Demographic::Shoujo)
            .with_tag(TagRef::new("t1", "en", "Action"))
            .with_language("en")
            .with_related("a2");
        let json = serde_json::to_string(&entry).expect("serialize");
        let back: CatalogEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, "a1");
        assert_eq!(back.title_in("en"), Some("Title"));
        assert_eq!(back.content_rating, Some(ContentRating::Suggestive));
        assert_eq!(back.related_ids, vec!["a2"]);
    }
}
