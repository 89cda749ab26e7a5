//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wayfarer_domain::traits::Suggestions;
use wayfarer_domain::ItineraryRecord;
use wayfarer_llm::{clean_suggestion, suggestion_points};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of itineraries.
    pub fn format_itineraries(&self, itineraries: &[ItineraryRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(itineraries)?),
            OutputFormat::Table => Ok(self.format_itineraries_table(itineraries)),
            OutputFormat::Quiet => Ok(format_ids(itineraries)),
        }
    }

    /// Format one itinerary with all of its details.
    pub fn format_itinerary(&self, itinerary: &ItineraryRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(itinerary)?),
            OutputFormat::Table => Ok(self.format_itinerary_detail(itinerary)),
            OutputFormat::Quiet => Ok(itinerary.id.to_string()),
        }
    }

    /// Format suggestions returned for `itinerary`.
    ///
    /// `plain` prints one cleaned paragraph instead of a list of points.
    pub fn format_suggestions(
        &self,
        itinerary: &ItineraryRecord,
        suggestions: &Suggestions,
        plain: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let points: Vec<serde_json::Value> = suggestion_points(&suggestions.suggestions)
                    .into_iter()
                    .map(|p| serde_json::json!({ "heading": p.heading, "detail": p.detail }))
                    .collect();
                let value = serde_json::json!({
                    "id": itinerary.id,
                    "location": itinerary.destination,
                    "suggestions": suggestions.suggestions,
                    "points": points,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(clean_suggestion(&suggestions.suggestions)),
            OutputFormat::Table if plain => Ok(clean_suggestion(&suggestions.suggestions)),
            OutputFormat::Table => {
                let points = suggestion_points(&suggestions.suggestions);
                if points.is_empty() {
                    return Ok(self.warning("No suggestions returned."));
                }

                let mut lines = vec![self.colorize(
                    &format!("Suggestions for {}", itinerary.destination),
                    "magenta",
                )];
                for point in points {
                    let line = match point.heading {
                        Some(heading) => {
                            format!("  • {}: {}", self.colorize(&heading, "cyan"), point.detail)
                        }
                        None => format!("  • {}", point.detail),
                    };
                    lines.push(line);
                }
                Ok(lines.join("\n"))
            }
        }
    }

    fn format_itineraries_table(&self, itineraries: &[ItineraryRecord]) -> String {
        if itineraries.is_empty() {
            return self.colorize("No itineraries found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Destination", "Dates", "Categories", "★"]);

        for itinerary in itineraries {
            builder.push_record([
                itinerary.id.to_string(),
                itinerary.title.clone(),
                itinerary.destination.clone(),
                format_dates(itinerary),
                itinerary.categories.join(", "),
                favorite_marker(itinerary.is_favorite).to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_itinerary_detail(&self, itinerary: &ItineraryRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["ID", itinerary.id.as_str()]);
        builder.push_record(["Title", &itinerary.title]);
        builder.push_record(["Destination", &itinerary.destination]);
        builder.push_record(["Dates", &format_dates(itinerary)]);
        builder.push_record(["Categories", &itinerary.categories.join(", ")]);
        builder.push_record(["Description", &itinerary.description]);
        builder.push_record(["Photo", &itinerary.photo_url]);
        builder.push_record(["Photo hint", &itinerary.photo_hint]);
        builder.push_record(["Favorite", if itinerary.is_favorite { "yes" } else { "no" }]);

        let mut details = builder.build();
        details.with(Style::rounded());

        if itinerary.activities.is_empty() {
            return format!("{}\n{}", details, self.info("No activities planned"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Day", "Activity", "Location"]);
        for activity in &itinerary.activities {
            builder.push_record([
                activity.day.to_string(),
                activity.name.clone(),
                format!("{:.4}, {:.4}", activity.location.lat, activity.location.lng),
            ]);
        }
        let mut activities = builder.build();
        activities
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", details, activities)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a created itinerary.
    pub fn itinerary_created(&self, itinerary: &ItineraryRecord) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.success(&format!(
                "Created itinerary '{}' ({})",
                itinerary.title, itinerary.id
            ))),
            _ => self.format_itinerary(itinerary),
        }
    }

    /// Format the result of a favorite toggle.
    pub fn favorite_toggled(&self, itinerary: &ItineraryRecord, is_favorite: bool) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({
                "id": itinerary.id,
                "isFavorite": is_favorite,
            })
            .to_string(),
            OutputFormat::Quiet => is_favorite.to_string(),
            OutputFormat::Table if is_favorite => {
                self.success(&format!("Added '{}' to favorites", itinerary.title))
            }
            OutputFormat::Table => {
                self.success(&format!("Removed '{}' from favorites", itinerary.title))
            }
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_ids(itineraries: &[ItineraryRecord]) -> String {
    itineraries
        .iter()
        .map(|i| i.id.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Date range of an itinerary for display.
pub fn format_dates(itinerary: &ItineraryRecord) -> String {
    if itinerary.start_date == itinerary.end_date {
        itinerary.start_date.clone()
    } else {
        format!("{} → {}", itinerary.start_date, itinerary.end_date)
    }
}

fn favorite_marker(is_favorite: bool) -> &'static str {
    if is_favorite {
        "★"
    } else {
        ""
    }
}
