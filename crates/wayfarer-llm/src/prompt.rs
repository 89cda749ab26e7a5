//! Prompt template for trip suggestions

use wayfarer_domain::traits::SuggestionRequest;

const TEMPLATE: &str = "You are a travel expert specializing in suggesting places of interest \
based on location and planned activities.

Given the following location and planned activities, suggest additional places of interest \
using local tourism web resources.

Location: {location}
Planned Activities: {activities}

Suggestions:";

/// Render the prompt sent to the model for `request`
///
/// An empty activity list is rendered as "none yet".
pub fn suggestion_prompt(request: &SuggestionRequest) -> String {
    let activities = match request.activities.trim() {
        "" => "none yet",
        planned => planned,
    };
    TEMPLATE
        .replace("{location}", request.location.trim())
        .replace("{activities}", activities)
}
