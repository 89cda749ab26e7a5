//! Configuration for the itinerary store

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Store tuning
///
/// # Examples
///
/// ```
/// use wayfarer_store::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert!(config.mutation_timeout().is_none());
///
/// let config = StoreConfig::with_mutation_timeout_ms(2_000);
/// assert_eq!(config.mutation_timeout().unwrap().as_millis(), 2_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Deadline for each gateway mutation call, in milliseconds
    ///
    /// An elapsed deadline counts as a gateway failure and triggers the
    /// same rollback as any other failure. Default: no deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_timeout_ms: Option<u64>,
}

impl StoreConfig {
    /// Configuration with a mutation deadline
    pub fn with_mutation_timeout_ms(ms: u64) -> Self {
        Self {
            mutation_timeout_ms: Some(ms),
        }
    }

    /// Mutation deadline as a Duration
    pub fn mutation_timeout(&self) -> Option<Duration> {
        self.mutation_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config: StoreConfig = serde_json::from_str(r#"{"mutation_timeout_ms": 1500}"#).unwrap();
        assert_eq!(config.mutation_timeout(), Some(Duration::from_millis(1500)));

        let empty: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, StoreConfig::default());
    }
}
