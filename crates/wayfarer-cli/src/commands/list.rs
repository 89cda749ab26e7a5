//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use wayfarer_domain::ItineraryFilter;

/// Execute the list command.
pub async fn execute_list(args: ListArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    let criteria = list_filter(&args);
    let itineraries = session.store().view(&criteria);

    println!("{}", formatter.format_itineraries(&itineraries)?);

    Ok(())
}

/// Build the view criteria for the given arguments.
fn list_filter(args: &ListArgs) -> ItineraryFilter {
    let mut criteria = if args.favorites {
        ItineraryFilter::favorites()
    } else {
        ItineraryFilter::all()
    };

    if let Some(term) = &args.search {
        criteria = criteria.with_search(term.clone());
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_construction() {
        let criteria = list_filter(&ListArgs {
            favorites: true,
            search: Some("alps".to_string()),
        });
        assert!(criteria.favorites_only);
        assert_eq!(criteria.search_term.as_deref(), Some("alps"));

        let all = list_filter(&ListArgs {
            favorites: false,
            search: None,
        });
        assert_eq!(all, ItineraryFilter::all());
    }
}
