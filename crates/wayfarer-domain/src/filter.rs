//! Query/Filter Engine
//!
//! Derives the favorites/search view of a collection. The view is a lazy
//! iterator borrowing the collection: it never mutates or reorders the
//! input, and cloning it restarts the traversal.

use crate::itinerary::ItineraryRecord;

/// View criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryFilter {
    /// Keep only records marked as favorite
    pub favorites_only: bool,

    /// Case-insensitive substring matched against title, destination and categories
    pub search_term: Option<String>,
}

impl ItineraryFilter {
    /// Filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter that keeps favorites only
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            search_term: None,
        }
    }

    /// Add a search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Lower-cased search term, or `None` when absent or empty
    ///
    /// Whitespace is part of the term: `" "` keeps only records containing a space.
    fn needle(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// Whether `record` matches the lower-cased `needle`
fn matches_term(record: &ItineraryRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.destination.to_lowercase().contains(needle)
        || record
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(needle))
}

/// Apply `criteria` to `collection`, preserving order
///
/// # Examples
///
/// ```
/// use wayfarer_domain::{filter, ItineraryFilter, ItineraryRecord};
///
/// let collection: Vec<ItineraryRecord> = Vec::new();
/// let view = filter(&collection, &ItineraryFilter::favorites().with_search("alps"));
/// assert_eq!(view.count(), 0);
/// ```
pub fn filter<'a>(
    collection: &'a [ItineraryRecord],
    criteria: &ItineraryFilter,
) -> impl Iterator<Item = &'a ItineraryRecord> + Clone + 'a {
    let favorites_only = criteria.favorites_only;
    let needle = criteria.needle();

    collection.iter().filter(move |record| {
        if favorites_only && !record.is_favorite {
            return false;
        }
        match &needle {
            Some(needle) => matches_term(record, needle),
            None => true,
        }
    })
}


#[cfg(test)]
mod proptests {
    use super::tests::record;
    use super::*;
    use proptest::prelude::*;

    fn arb_record() -> impl Strategy<Value = ItineraryRecord> {
        (
            "[a-zA-Z ]{0,12}",
            "[a-zA-Z, ]{0,12}",
            prop::collection::vec("[a-zA-Z]{1,6}", 1..3),
            any::<bool>(),
            any::<u32>(),
        )
            .prop_map(|(title, destination, categories, fav, id)| {
                let cats: Vec<&str> = categories.iter().map(String::as_str).collect();
                record(&id.to_string(), &title, &destination, &cats, fav)
            })
    }

    proptest! {
        /// Property: search keeps exactly the records with a case-insensitive
        /// substring hit in title, destination or a category, in input order
        #[test]
        fn test_search_matches_reference(
            collection in prop::collection::vec(arb_record(), 0..12),
            term in "[a-zA-Z ]{1,3}",
        ) {
            let needle = term.to_lowercase();
            let expected: Vec<&ItineraryRecord> = collection
                .iter()
                .filter(|r| {
                    r.title.to_lowercase().contains(&needle)
                        || r.destination.to_lowercase().contains(&needle)
                        || r.categories.iter().any(|c| c.to_lowercase().contains(&needle))
                })
                .collect();

            let actual: Vec<&ItineraryRecord> =
                filter(&collection, &ItineraryFilter::all().with_search(term)).collect();

            prop_assert_eq!(actual, expected);
        }

        /// Property: favorites filter keeps exactly the favorites, in order
        #[test]
        fn test_favorites_matches_reference(
            collection in prop::collection::vec(arb_record(), 0..12),
        ) {
            let expected: Vec<&ItineraryRecord> =
                collection.iter().filter(|r| r.is_favorite).collect();
            let actual: Vec<&ItineraryRecord> =
                filter(&collection, &ItineraryFilter::favorites()).collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: the view is always a subsequence of the input
        #[test]
        fn test_view_is_subsequence(
            collection in prop::collection::vec(arb_record(), 0..12),
            favorites_only in any::<bool>(),
            term in "[a-z ]{0,2}",
        ) {
            let criteria = ItineraryFilter { favorites_only, search_term: Some(term) };
            let mut remaining = collection.iter();
            for hit in filter(&collection, &criteria) {
                prop_assert!(remaining.any(|r| std::ptr::eq(r, hit)));
            }
        }
    }
}
