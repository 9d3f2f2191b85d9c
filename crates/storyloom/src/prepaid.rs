//! Payment gate for callers that settle payment outside the pipeline.

use async_trait::async_trait;
use storyloom_core::Story;
use storyloom_error::StoryloomResult;
use storyloom_interface::{PaymentGate, PaymentOutcome};
use tracing::{debug, instrument};

/// Confirms with a transaction reference supplied up front.
///
/// Without a reference every request fails with the configured message.
#[derive(Debug, Clone)]
pub struct PrepaidGate {
    transaction: Option<String>,
    failure_message: String,
}

impl PrepaidGate {
    /// Gate confirming with `transaction`, if any.
    pub fn new(transaction: Option<String>) -> Self {
        Self {
            transaction: transaction.filter(|reference| !reference.trim().is_empty()),
            failure_message: "No payment reference supplied".to_string(),
        }
    }

    /// Message reported when no reference is available.
    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }
}

#[async_trait]
impl PaymentGate for PrepaidGate {
    #[instrument(skip(self, story), fields(story_id = %story.id))]
    async fn request_payment(&self, story: &Story) -> StoryloomResult<PaymentOutcome> {
        match &self.transaction {
            Some(reference) => {
                debug!(reference = %reference, "Confirming prepaid story");
                Ok(PaymentOutcome::Confirmed(
                    story.clone().with_payment_transaction(reference.clone()),
                ))
            }
            None => Ok(PaymentOutcome::Failed(self.failure_message.clone())),
        }
    }
}
