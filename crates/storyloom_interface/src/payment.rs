//! Payment gate abstraction.

use async_trait::async_trait;
use storyloom_core::Story;
use storyloom_error::StoryloomResult;

/// Result of asking the payment gate to charge for a story.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Payment went through; carries the story as confirmed by the gate.
    Confirmed(Story),
    /// Payment failed with a user-facing message.
    Failed(String),
    /// The user walked away from the payment.
    Cancelled,
}

/// Decides whether generation may proceed for an unpaid story.
#[async_trait]
pub trait PaymentGate: Send + Sync {
    /// Ask for payment and wait for the outcome.
    async fn request_payment(&self, story: &Story) -> StoryloomResult<PaymentOutcome>;
}
