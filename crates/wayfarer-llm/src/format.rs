//! Display helpers for suggestion text
//!
//! Models answer in loose markdown. These helpers turn that into either a
//! single clean paragraph or a list of points, optionally headed by a place
//! name ("Sintra: fairy-tale palaces").

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([.,!?:;])").expect("Invalid punctuation regex"));

static POINT_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\* |\n|\d+\. ").expect("Invalid point break regex"));

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:–-]+)[:–-](.*)$").expect("Invalid heading regex"));

/// One point of a suggestion list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPoint {
    /// Leading phrase before a colon or dash, usually a place name
    pub heading: Option<String>,

    /// Remaining text of the point
    pub detail: String,
}

impl fmt::Display for SuggestionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.heading {
            Some(heading) => write!(f, "{}: {}", heading, self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

/// Flatten suggestion text into one paragraph
///
/// Strips markdown emphasis, collapses all whitespace (newlines included)
/// to single spaces and removes spaces before punctuation.
///
/// # Examples
///
/// ```
/// use wayfarer_llm::clean_suggestion;
///
/// let text = "**Sintra** :\n  palaces  and gardens .";
/// assert_eq!(clean_suggestion(text), "Sintra: palaces and gardens.");
/// ```
pub fn clean_suggestion(text: &str) -> String {
    let stripped = text.replace('*', "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    SPACE_BEFORE_PUNCT.replace_all(&collapsed, "$1").into_owned()
}

/// Split suggestion text into points
///
/// Points are separated by newlines, `* ` bullets or `1. ` style numbering.
/// A point of the form `Heading: detail` (or with a dash) keeps the heading
/// separately.
pub fn suggestion_points(text: &str) -> Vec<SuggestionPoint> {
    let stripped = text.replace("**", "");
    POINT_BREAK
        .split(&stripped)
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(to_point)
        .collect()
}

fn to_point(point: &str) -> SuggestionPoint {
    if let Some(caps) = HEADING.captures(point) {
        let heading = caps[1].trim();
        let detail = caps[2].trim();
        if !heading.is_empty() && !detail.is_empty() {
            return SuggestionPoint {
                heading: Some(heading.to_string()),
                detail: detail.to_string(),
            };
        }
    }
    SuggestionPoint {
        heading: None,
        detail: point.to_string(),
    }
}
