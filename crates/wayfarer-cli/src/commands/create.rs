//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use std::fs;
use wayfarer_domain::{Activity, GeoPoint, ItineraryDraft};

/// Execute the create command.
pub async fn execute_create(
    args: CreateArgs,
    session: &Session,
    formatter: &Formatter,
) -> Result<()> {
    let draft = match &args.file {
        Some(path) => read_draft(path)?,
        None => draft_from_args(args)?,
    };

    let itinerary = session.store().create(&draft).await?;
    println!("{}", formatter.itinerary_created(&itinerary)?);

    Ok(())
}

/// Read a draft from a JSON file.
fn read_draft(path: &str) -> Result<ItineraryDraft> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Assemble a draft from command-line flags.
///
/// Missing flags become empty fields so validation can report all of them
/// at once.
fn draft_from_args(args: CreateArgs) -> Result<ItineraryDraft> {
    let activities = args
        .activity
        .iter()
        .map(|spec| parse_activity(spec))
        .collect::<Result<Vec<_>>>()?;

    Ok(ItineraryDraft {
        title: args.title.unwrap_or_default(),
        destination: args.destination.unwrap_or_default(),
        start_date: args.start.unwrap_or_default(),
        end_date: args.end.unwrap_or_default(),
        categories: args.category,
        description: args.description.unwrap_or_default(),
        photo_url: args.photo.unwrap_or_default(),
        activities: if activities.is_empty() {
            None
        } else {
            Some(activities)
        },
    })
}

/// Parse an activity of the form `day|name|lat|lng`.
fn parse_activity(spec: &str) -> Result<Activity> {
    let parts: Vec<&str> = spec.split('|').map(str::trim).collect();
    let [day, name, lat, lng] = parts.as_slice() else {
        return Err(CliError::InvalidInput(format!(
            "Activity '{}' must have the form day|name|lat|lng",
            spec
        )));
    };

    let day = day
        .parse::<u32>()
        .map_err(|e| CliError::InvalidInput(format!("Invalid activity day '{}': {}", day, e)))?;
    let lat = parse_coordinate("latitude", lat)?;
    let lng = parse_coordinate("longitude", lng)?;

    Ok(Activity {
        day,
        name: name.to_string(),
        location: GeoPoint { lat, lng },
    })
}

fn parse_coordinate(what: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|e| CliError::InvalidInput(format!("Invalid {} '{}': {}", what, value, e)))
}
