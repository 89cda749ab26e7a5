//! Draft validation
//!
//! Checks a draft against the rules a new itinerary must satisfy before it
//! is handed to the Record Factory. All violations are collected so callers
//! can report them in one go.

use crate::error::{ValidationError, Violation};
use crate::itinerary::ItineraryDraft;
use chrono::NaiveDate;

/// Minimum title length in characters
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum destination length in characters
pub const MIN_DESTINATION_LEN: usize = 2;

/// Minimum description length in characters
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// ISO calendar date format used for trip dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl ItineraryDraft {
    /// Validate the draft, returning every violated rule
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer_domain::ItineraryDraft;
    ///
    /// let err = ItineraryDraft::default().validate().unwrap_err();
    /// assert!(err.has_field("title"));
    /// assert!(err.has_field("categories"));
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        check_min_len(&mut violations, "title", &self.title, MIN_TITLE_LEN);
        check_min_len(
            &mut violations,
            "destination",
            &self.destination,
            MIN_DESTINATION_LEN,
        );

        let start = parse_date(&mut violations, "startDate", &self.start_date);
        let end = parse_date(&mut violations, "endDate", &self.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                violations.push(Violation::new(
                    "endDate",
                    "end date must not be before start date",
                ));
            }
        }

        if self.categories.iter().all(|c| c.trim().is_empty()) {
            violations.push(Violation::new("categories", "select at least one category"));
        }

        check_min_len(
            &mut violations,
            "description",
            &self.description,
            MIN_DESCRIPTION_LEN,
        );

        match url::Url::parse(self.photo_url.trim()) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            _ => violations.push(Violation::new("photoUrl", "must be a valid http(s) URL")),
        }

        for (i, activity) in self.activities.iter().flatten().enumerate() {
            if activity.day == 0 {
                violations.push(Violation::new(
                    format!("activities[{}].day", i),
                    "day must be a positive number",
                ));
            }
            if activity.name.trim().is_empty() {
                violations.push(Violation::new(
                    format!("activities[{}].name", i),
                    "name is required",
                ));
            }
            if !activity.location.is_valid() {
                violations.push(Violation::new(
                    format!("activities[{}].location", i),
                    "latitude must be within [-90, 90] and longitude within [-180, 180]",
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

fn check_min_len(violations: &mut Vec<Violation>, field: &str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        violations.push(Violation::new(
            field,
            format!("must be at least {} characters", min),
        ));
    }
}

fn parse_date(violations: &mut Vec<Violation>, field: &str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(Violation::new(field, "must be a date in YYYY-MM-DD form"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Activity, GeoPoint};

    fn valid() -> ItineraryDraft {
        ItineraryDraft {
            title: "Summer in the Alps".to_string(),
            destination: "Interlaken, Switzerland".to_string(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-07-10".to_string(),
            categories: vec!["Adventure".to_string()],
            description: "Hiking, lakes and cheese.".to_string(),
            photo_url: "https://example.com/alps.jpg".to_string(),
            activities: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_same_day_trip_is_valid() {
        let mut d = valid();
        d.end_date = d.start_date.clone();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let mut d = valid();
        d.end_date = "2024-06-30".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_field("endDate"));
    }

    #[test]
    fn test_unparseable_dates() {
        let mut d = valid();
        d.start_date = "July 1st".to_string();
        d.end_date = "2024-02-30".to_string();
        let err = d.validate().unwrap_err();
        assert!(err.has_field("startDate"));
        assert!(err.has_field("endDate"));
    }

    #[test]
    fn test_blank_categories_rejected() {
        let mut d = valid();
        d.categories = vec!["   ".to_string()];
        assert!(d.validate().unwrap_err().has_field("categories"));
    }

    #[test]
    fn test_photo_url_must_be_web() {
        let mut d = valid();
        d.photo_url = "not a url".to_string();
        assert!(d.validate().unwrap_err().has_field("photoUrl"));

        d.photo_url = "file:///tmp/alps.jpg".to_string();
        assert!(d.validate().unwrap_err().has_field("photoUrl"));
    }

    #[test]
    fn test_short_fields_collected_together() {
        let mut d = valid();
        d.title = "Al".to_string();
        d.destination = " X ".to_string();
        d.description = "short".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_activity_rules() {
        let mut d = valid();
        d.activities = Some(vec![
            Activity {
                day: 1,
                name: "Harder Kulm".to_string(),
                location: GeoPoint { lat: 46.69, lng: 7.86 },
            },
            Activity {
                day: 0,
                name: " ".to_string(),
                location: GeoPoint { lat: 120.0, lng: 7.86 },
            },
        ]);
        let err = d.validate().unwrap_err();
        assert!(err.has_field("activities[1].day"));
        assert!(err.has_field("activities[1].name"));
        assert!(err.has_field("activities[1].location"));
        assert!(!err.has_field("activities[0].day"));
    }
}
