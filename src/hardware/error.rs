//! Provider error types

use thiserror::Error;

/// Errors reported by the external location and sensor providers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// A position fix could not be obtained
    #[error("position unavailable: {reason}")]
    PositionUnavailable { reason: String },
    /// The magnetometer is missing or disabled
    #[error("sensor unavailable")]
    SensorUnavailable,
    /// The sensor reported available but refused the subscription
    #[error("sensor subscription failed: {reason}")]
    SubscriptionFailed { reason: String },
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::PositionUnavailable {
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "position unavailable: timeout");
        assert_eq!(ProviderError::SensorUnavailable.to_string(), "sensor unavailable");
    }
}
