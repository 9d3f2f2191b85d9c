//! Metrics for model provider calls.
//!
//! OpenTelemetry instruments labelled with provider and model. Without an
//! installed meter provider the global no-op meter makes them free.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<GenerationMetrics> = OnceLock::new();

/// Instruments for generation requests.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Successful provider requests
    pub requests: Counter<u64>,
    /// Failed provider requests
    pub errors: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
    /// Tokens reported by text providers
    pub tokens_used: Counter<u64>,
    /// Images returned by image providers
    pub images: Counter<u64>,
}

impl GenerationMetrics {
    fn init() -> Self {
        let meter = global::meter("storyloom_models");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("generation.requests")
                .with_description("Successful generation requests")
                .build(),
            errors: meter
                .u64_counter("generation.errors")
                .with_description("Failed generation requests")
                .build(),
            duration: meter
                .f64_histogram("generation.duration")
                .with_unit("seconds")
                .with_description("Generation call duration")
                .build(),
            tokens_used: meter
                .u64_counter("generation.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
            images: meter
                .u64_counter("generation.images")
                .with_description("Images generated")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage of a text response.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        self.tokens_used
            .add(total_tokens, &[KeyValue::new("model", model.to_string())]);
    }

    /// Record a returned image.
    pub fn record_image(&self, model: &str) {
        self.images
            .add(1, &[KeyValue::new("model", model.to_string())]);
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout", "invalid_request", "unknown"
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("rate limit") || error_str.contains("429") {
        "rate_limit"
    } else if error_str.contains("auth") || error_str.contains("401") || error_str.contains("403")
    {
        "auth"
    } else if error_str.contains("timeout") || error_str.contains("timed out") {
        "timeout"
    } else if error_str.contains("network")
        || error_str.contains("connection")
        || error_str.contains("dns")
    {
        "network"
    } else if error_str.contains("400") || error_str.contains("invalid") {
        "invalid_request"
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_error::{GenerationError, GenerationErrorKind, HttpError};

    #[test]
    fn test_classify_error() {
        let limited = GenerationError::new(GenerationErrorKind::Api {
            status: 429,
            message: "slow down".to_string(),
        });
        assert_eq!(classify_error(&limited), "rate_limit");

        let refused = HttpError::new("connection refused");
        assert_eq!(classify_error(&refused), "network");

        let odd = HttpError::new("something else");
        assert_eq!(classify_error(&odd), "unknown");
    }
}
