//! Wayfarer Suggestion Provider Layer
//!
//! Pluggable providers for AI trip suggestions.
//!
//! # Architecture
//!
//! This crate provides implementations of the `SuggestionProvider` trait from
//! `wayfarer-domain`, plus the helpers presentation uses to display the
//! free-form text a provider returns.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use wayfarer_llm::MockProvider;
//! use wayfarer_domain::traits::{SuggestionProvider, SuggestionRequest};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Visit the old town.");
//! let request = SuggestionRequest {
//!     location: "Lisbon, Portugal".into(),
//!     activities: "Tram 28".into(),
//! };
//! let result = provider.suggest(&request).await.unwrap();
//! assert_eq!(result.suggestions, "Visit the old town.");
//! # });
//! ```

#![warn(missing_docs)]

pub mod format;
pub mod ollama;
pub mod prompt;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use wayfarer_domain::traits::{SuggestionProvider, SuggestionRequest, Suggestions};

pub use format::{clean_suggestion, suggestion_points, SuggestionPoint};
pub use ollama::OllamaProvider;
pub use prompt::suggestion_prompt;

/// Errors that can occur during suggestion requests
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Canned {
    Text(String),
    Error,
}

/// Mock suggestion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses can be overridden per location.
///
/// # Examples
///
/// ```
/// use wayfarer_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Tokyo, Japan", "Try the Tsukiji outer market.");
/// provider.add_error("Atlantis");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    calls: Arc<Mutex<Vec<SuggestionRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for every location
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given location
    pub fn add_response(&mut self, location: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(location.into(), Canned::Text(response.into()));
    }

    /// Configure to return an error for a specific location
    pub fn add_error(&mut self, location: impl Into<String>) {
        lock(&self.responses).insert(location.into(), Canned::Error);
    }

    /// Get the number of times suggest was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<SuggestionRequest> {
        lock(&self.calls).clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock suggestions")
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl SuggestionProvider for MockProvider {
    type Error = LlmError;

    async fn suggest(&self, request: &SuggestionRequest) -> Result<Suggestions, Self::Error> {
        lock(&self.calls).push(request.clone());

        let canned = lock(&self.responses).get(&request.location).cloned();
        match canned {
            Some(Canned::Error) => Err(LlmError::Other("Mock error".to_string())),
            Some(Canned::Text(text)) => Ok(Suggestions { suggestions: text }),
            None => Ok(Suggestions {
                suggestions: self.default_response.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(location: &str) -> SuggestionRequest {
        SuggestionRequest {
            location: location.to_string(),
            activities: "Walking tour".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.suggest(&request("anywhere")).await.unwrap();
        assert_eq!(result.suggestions, "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("Rome, Italy", "Trastevere");
        provider.add_response("Oslo, Norway", "Vigeland Park");

        let rome = provider.suggest(&request("Rome, Italy")).await.unwrap();
        let oslo = provider.suggest(&request("Oslo, Norway")).await.unwrap();
        let other = provider.suggest(&request("Lima, Peru")).await.unwrap();

        assert_eq!(rome.suggestions, "Trastevere");
        assert_eq!(oslo.suggestions, "Vigeland Park");
        assert_eq!(other.suggestions, "Default mock suggestions");
    }

    #[tokio::test]
    async fn test_mock_provider_call_history() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.suggest(&request("Kyoto, Japan")).await.unwrap();
        provider.suggest(&request("Nara, Japan")).await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.requests()[1].location, "Nara, Japan");

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("Atlantis");

        let result = provider.suggest(&request("Atlantis")).await;
        assert!(matches!(result, Err(LlmError::Other(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.suggest(&request("Bern")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
