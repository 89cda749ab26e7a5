//! Record Factory - builds new itinerary records from drafts

use crate::itinerary::{ItineraryDraft, ItineraryId, ItineraryRecord, UserId};

/// Builds normalized itinerary records
///
/// The factory is pure: it reads the draft and the owning identity and
/// returns a fresh record. The id it assigns is a placeholder that the store
/// replaces with whatever id the gateway hands back from `add`.
pub struct RecordFactory;

impl RecordFactory {
    /// Build a new record owned by `owner`
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer_domain::{ItineraryDraft, RecordFactory, UserId};
    ///
    /// let draft = ItineraryDraft {
    ///     title: "Summer in the Alps".into(),
    ///     destination: "Interlaken, Switzerland".into(),
    ///     categories: vec!["Adventure".into()],
    ///     ..Default::default()
    /// };
    /// let record = RecordFactory::build(&draft, &UserId::new("alice"));
    /// assert_eq!(record.photo_hint, "interlaken");
    /// assert!(!record.is_favorite);
    /// assert!(record.activities.is_empty());
    /// ```
    pub fn build(draft: &ItineraryDraft, owner: &UserId) -> ItineraryRecord {
        ItineraryRecord {
            id: ItineraryId::generate(),
            owner: owner.clone(),
            title: draft.title.trim().to_string(),
            destination: draft.destination.trim().to_string(),
            start_date: draft.start_date.trim().to_string(),
            end_date: draft.end_date.trim().to_string(),
            categories: normalize_categories(&draft.categories),
            description: draft.description.trim().to_string(),
            photo_url: draft.photo_url.trim().to_string(),
            photo_hint: derive_photo_hint(&draft.destination),
            activities: draft.activities.clone().unwrap_or_default(),
            is_favorite: false,
        }
    }
}

/// Lower-cased, trimmed part of `destination` before the first comma
pub fn derive_photo_hint(destination: &str) -> String {
    destination
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Trim tags, drop blanks, and keep the first occurrence of each
fn normalize_categories(categories: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for tag in categories {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Activity, GeoPoint};

    fn draft() -> ItineraryDraft {
        ItineraryDraft {
            title: "Tokyo Work Trip".to_string(),
            destination: "Tokyo, Japan".to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-05".to_string(),
            categories: vec!["Work".to_string()],
            description: "Client meetings in Shibuya".to_string(),
            photo_url: "https://example.com/tokyo.jpg".to_string(),
            activities: None,
        }
    }

    #[test]
    fn test_defaults() {
        let record = RecordFactory::build(&draft(), &UserId::from("bob"));
        assert_eq!(record.owner, UserId::from("bob"));
        assert_eq!(record.photo_hint, "tokyo");
        assert!(record.activities.is_empty());
        assert!(!record.is_favorite);
    }

    #[test]
    fn test_photo_hint_without_comma() {
        assert_eq!(derive_photo_hint("  Reykjavik "), "reykjavik");
        assert_eq!(derive_photo_hint("New York, NY, USA"), "new york");
        assert_eq!(derive_photo_hint(""), "");
    }

    #[test]
    fn test_keeps_supplied_activities() {
        let mut d = draft();
        d.activities = Some(vec![Activity {
            day: 1,
            name: "Tsukiji Outer Market".to_string(),
            location: GeoPoint { lat: 35.66, lng: 139.77 },
        }]);
        let record = RecordFactory::build(&d, &UserId::from("bob"));
        assert_eq!(record.activities.len(), 1);
    }

    #[test]
    fn test_categories_are_deduplicated() {
        let mut d = draft();
        d.categories = vec![
            " Work ".to_string(),
            "Leisure".to_string(),
            "Work".to_string(),
            "  ".to_string(),
        ];
        let record = RecordFactory::build(&d, &UserId::from("bob"));
        assert_eq!(record.categories, vec!["Work", "Leisure"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let d = draft();
        let before = d.clone();
        let _ = RecordFactory::build(&d, &UserId::from("bob"));
        assert_eq!(d, before);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the hint never contains a comma and is already lower-case
        #[test]
        fn test_photo_hint_shape(destination in "[A-Za-zÀ-ÿ ,.-]{0,40}") {
            let hint = derive_photo_hint(&destination);
            prop_assert!(!hint.contains(','));
            prop_assert_eq!(hint.clone(), hint.to_lowercase());
            prop_assert_eq!(hint.trim(), hint.as_str());
        }

        /// Property: the hint is the lowered prefix before the first comma
        #[test]
        fn test_photo_hint_prefix(city in "[A-Za-z ]{1,20}", rest in "[A-Za-z, ]{0,20}") {
            let destination = format!("{},{}", city, rest);
            prop_assert_eq!(derive_photo_hint(&destination), city.trim().to_lowercase());
        }
    }
}
