//! Suggestion flow from a stored itinerary to display-ready points

use wayfarer_domain::traits::{SuggestionProvider, SuggestionRequest};
use wayfarer_domain::{Activity, GeoPoint, ItineraryDraft, RecordFactory, UserId};
use wayfarer_llm::{clean_suggestion, suggestion_points, suggestion_prompt, MockProvider};

fn lisbon_trip() -> ItineraryDraft {
    ItineraryDraft {
        title: "Lisbon long weekend".to_string(),
        destination: "Lisbon, Portugal".to_string(),
        start_date: "2024-05-02".to_string(),
        end_date: "2024-05-05".to_string(),
        categories: vec!["Leisure".to_string()],
        description: "Trams, tiles and pastries".to_string(),
        photo_url: "https://example.com/lisbon.jpg".to_string(),
        activities: Some(vec![
            Activity {
                day: 1,
                name: "Tram 28".to_string(),
                location: GeoPoint { lat: 38.71, lng: -9.13 },
            },
            Activity {
                day: 2,
                name: "Alfama".to_string(),
                location: GeoPoint { lat: 38.71, lng: -9.13 },
            },
        ]),
    }
}

#[tokio::test]
async fn test_suggestions_for_itinerary() {
    let record = RecordFactory::build(&lisbon_trip(), &UserId::from("alice"));
    let request = SuggestionRequest::for_itinerary(&record);
    assert_eq!(request.location, "Lisbon, Portugal");
    assert_eq!(request.activities, "Tram 28, Alfama");

    let prompt = suggestion_prompt(&request);
    assert!(prompt.contains("Planned Activities: Tram 28, Alfama"));

    let mut provider = MockProvider::default();
    provider.add_response(
        "Lisbon, Portugal",
        "1. **Sintra**: Palaces in the hills.\n2. **Belém Tower** - Riverside fort",
    );
    let result = provider.suggest(&request).await.unwrap();

    let points = suggestion_points(&result.suggestions);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].heading.as_deref(), Some("Sintra"));
    assert_eq!(points[1].to_string(), "Belém Tower: Riverside fort");

    assert_eq!(
        clean_suggestion(&result.suggestions),
        "1. Sintra: Palaces in the hills. 2. Belém Tower - Riverside fort"
    );
    assert_eq!(provider.requests(), vec![request]);
}
