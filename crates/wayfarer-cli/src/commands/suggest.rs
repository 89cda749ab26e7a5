//! Suggest command implementation.

use crate::cli::SuggestArgs;
use crate::config::SuggestionSettings;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use wayfarer_domain::traits::{SuggestionProvider, SuggestionRequest};
use wayfarer_llm::OllamaProvider;

/// Execute the suggest command.
pub async fn execute_suggest(
    args: SuggestArgs,
    session: &Session,
    settings: &SuggestionSettings,
    formatter: &Formatter,
) -> Result<()> {
    let itinerary = session.require(&args.id)?;
    let model = args.model.as_deref().unwrap_or(&settings.model);
    let provider =
        OllamaProvider::new(&settings.endpoint, model)?.with_max_retries(settings.max_retries);

    let output = suggest_with(&provider, &itinerary, args.plain, formatter).await?;
    println!("{}", output);

    Ok(())
}

/// Ask `provider` about `itinerary` and format the answer.
async fn suggest_with<P>(
    provider: &P,
    itinerary: &wayfarer_domain::ItineraryRecord,
    plain: bool,
    formatter: &Formatter,
) -> Result<String>
where
    P: SuggestionProvider,
    crate::error::CliError: From<P::Error>,
{
    let request = SuggestionRequest::for_itinerary(itinerary);
    let suggestions = provider.suggest(&request).await?;
    formatter.format_suggestions(itinerary, &suggestions, plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use wayfarer_domain::{ItineraryDraft, RecordFactory, UserId};
    use wayfarer_llm::MockProvider;

    fn itinerary() -> wayfarer_domain::ItineraryRecord {
        let draft = ItineraryDraft {
            title: "Summer in the Alps".to_string(),
            destination: "Interlaken, Switzerland".to_string(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-07-10".to_string(),
            categories: vec!["Adventure".to_string()],
            description: "Hiking and lakes".to_string(),
            photo_url: "https://example.com/alps.jpg".to_string(),
            activities: None,
        };
        RecordFactory::build(&draft, &UserId::from("alice"))
    }

    #[tokio::test]
    async fn test_suggest_with_mock_provider() {
        let mut provider = MockProvider::default();
        provider.add_response("Interlaken, Switzerland", "* Jungfraujoch: Top of Europe");
        let formatter = Formatter::new(OutputFormat::Table, false);

        let output = suggest_with(&provider, &itinerary(), false, &formatter)
            .await
            .unwrap();

        assert!(output.contains("• Jungfraujoch: Top of Europe"));
        assert_eq!(provider.requests()[0].activities, "");
    }

    #[tokio::test]
    async fn test_suggest_provider_failure() {
        let mut provider = MockProvider::default();
        provider.add_error("Interlaken, Switzerland");
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = suggest_with(&provider, &itinerary(), false, &formatter).await;
        assert!(matches!(result, Err(CliError::Llm(_))));
    }
}
