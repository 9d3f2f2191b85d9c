mod test_utils;

use storyloom_core::{GenerationStep, Story};
use storyloom_interface::{PaymentOutcome, StoryStore};
use storyloom_narrative::StageOutcome;
use test_utils::{
    Event, Harness, MockImageGenerator, MockPaymentGate, MockTextGenerator, PromptKind,
};

fn harness_with(gate: MockPaymentGate) -> Harness {
    Harness::new(MockTextGenerator::new(), MockImageGenerator::succeeding(), gate)
}

fn unpaid_story() -> Story {
    Story::new("Unpaid").with_premise("A cat learns to sail")
}

#[tokio::test]
async fn test_cancelled_payment_never_generates() {
    let harness = harness_with(MockPaymentGate::new(PaymentOutcome::Cancelled));
    let story = unpaid_story();
    harness.store.insert_story(&story).await.unwrap();

    let outcome = harness.generator.start(story.clone()).await.unwrap();

    assert_eq!(outcome, StageOutcome::PaymentDeclined);
    assert_eq!(harness.gate.calls(), 1);
    assert!(harness.text.requests().is_empty());
    assert!(harness.image.requests().is_empty());
    assert_eq!(
        harness.listener.events(),
        vec![Event::PaymentPending(true), Event::PaymentPending(false)]
    );
    assert!(!harness.generator.status(story.id).await.payment_pending());
}

#[tokio::test]
async fn test_failed_payment_notifies_with_message() {
    let harness = harness_with(MockPaymentGate::new(PaymentOutcome::Failed(
        "Card declined".to_string(),
    )));
    let story = unpaid_story();
    harness.store.insert_story(&story).await.unwrap();

    let outcome = harness.generator.start(story).await.unwrap();

    assert_eq!(outcome, StageOutcome::PaymentDeclined);
    assert_eq!(harness.listener.errors(), vec!["Card declined"]);
    assert!(harness.text.requests().is_empty());
}

#[tokio::test]
async fn test_gate_error_is_declined_and_notified() {
    let harness = harness_with(MockPaymentGate::failing());
    let story = unpaid_story();
    harness.store.insert_story(&story).await.unwrap();

    let outcome = harness.generator.start(story).await.unwrap();

    assert_eq!(outcome, StageOutcome::PaymentDeclined);
    assert_eq!(harness.listener.errors(), vec!["Payment failed"]);
    assert!(harness.text.requests().is_empty());
}

#[tokio::test]
async fn test_confirmation_without_transaction_is_not_trusted() {
    let story = unpaid_story();
    let harness = harness_with(MockPaymentGate::new(PaymentOutcome::Confirmed(
        story.clone(),
    )));
    harness.store.insert_story(&story).await.unwrap();

    let outcome = harness.generator.start(story).await.unwrap();

    assert_eq!(outcome, StageOutcome::PaymentDeclined);
    assert_eq!(harness.listener.errors(), vec!["Payment was not confirmed"]);
    assert!(harness.text.requests().is_empty());
}

#[tokio::test]
async fn test_confirmed_payment_proceeds_to_brief() {
    let story = unpaid_story();
    let confirmed = story.clone().with_payment_transaction("txn-42");
    let harness = harness_with(MockPaymentGate::new(PaymentOutcome::Confirmed(
        confirmed.clone(),
    )));
    harness.store.insert_story(&story).await.unwrap();

    let outcome = harness.generator.start(story.clone()).await.unwrap();

    let briefed = outcome.story().unwrap();
    assert_eq!(briefed.payment_transaction.as_deref(), Some("txn-42"));
    assert!(briefed.brief.is_some());
    assert_eq!(harness.text.kinds(), vec![PromptKind::Brief]);
    assert_eq!(harness.listener.steps(), vec![GenerationStep::Brief]);
    assert!(!harness.generator.status(story.id).await.payment_pending());
}

#[tokio::test]
async fn test_paid_story_skips_the_gate() {
    let harness = harness_with(MockPaymentGate::new(PaymentOutcome::Cancelled));
    let story = test_utils::paid_story("Prepaid");
    harness.store.insert_story(&story).await.unwrap();

    harness.generator.start(story).await.unwrap();

    assert_eq!(harness.gate.calls(), 0);
    assert_eq!(harness.text.kinds()[0], PromptKind::Brief);
}
