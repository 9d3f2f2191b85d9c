//! Test utilities for the generation pipeline.
//!
//! Scripted generators, a recording listener and a configurable payment
//! gate. Nothing here touches the network.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use storyloom_core::{GenerationStep, ImageRequest, Story, StoryId, TextRequest};
use storyloom_error::{GenerationError, GenerationErrorKind, StoryloomError, StoryloomResult};
use storyloom_interface::{
    GenerationListener, ImageGenerator, PaymentGate, PaymentOutcome, StoryStore, TextGenerator,
};
use storyloom_narrative::{InMemoryStoryStore, StoryGenerator};

pub const BRIEF: &str = "1. Departure: Mira leaves the harbor.\n2. Storm: Waves rise.\n3. Return: Mira comes home.";

pub const META: &str = r#"Here is the metadata:
```json
{"storyTitles": ["The Bright Harbor", "Harbor Lights"], "description": "A cozy sea tale",
 "summary": "Mira braves a storm", "summaryEn": "Mira braves a storm",
 "coverText": "A lighthouse at dusk", "coverTextEn": "A lighthouse at dusk"}
```"#;

/// A single scripted answer.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Return `Ok(None)`
    Empty,
    /// Return a provider error
    Error,
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn resolve(&self) -> StoryloomResult<Option<String>> {
        match self {
            Self::Text(text) => Ok(Some(text.clone())),
            Self::Empty => Ok(None),
            Self::Error => Err(StoryloomError::from(GenerationError::new(
                GenerationErrorKind::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                },
            ))),
        }
    }
}

/// Which prompt a text request carries, recognised by the bundled catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Brief,
    Scene(usize),
    Summary,
    Meta,
    Unknown,
}

impl PromptKind {
    pub fn of(prompt: &str) -> Self {
        if prompt.contains("Summarize the following scene") {
            Self::Summary
        } else if prompt.contains("Answer with a single JSON object") {
            Self::Meta
        } else if let Some(rest) = prompt.split("Write scene ").nth(1) {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().map(Self::Scene).unwrap_or(Self::Unknown)
        } else if prompt.contains("Plan a short illustrated story") {
            Self::Brief
        } else {
            Self::Unknown
        }
    }
}

/// Text generator answering per prompt kind.
///
/// Scenes answer `Body of scene N.` and summaries answer `Summary: <content>`
/// unless scripted otherwise.
pub struct MockTextGenerator {
    brief: MockResponse,
    scenes: HashMap<usize, MockResponse>,
    summary: Option<MockResponse>,
    meta: MockResponse,
    requests: Mutex<Vec<TextRequest>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self {
            brief: MockResponse::text(BRIEF),
            scenes: HashMap::new(),
            summary: None,
            meta: MockResponse::text(META),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brief(mut self, response: MockResponse) -> Self {
        self.brief = response;
        self
    }

    pub fn with_scene(mut self, ordinal: usize, response: MockResponse) -> Self {
        self.scenes.insert(ordinal, response);
        self
    }

    pub fn with_summary(mut self, response: MockResponse) -> Self {
        self.summary = Some(response);
        self
    }

    pub fn with_meta(mut self, response: MockResponse) -> Self {
        self.meta = response;
        self
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Kinds of every prompt received, in order.
    pub fn kinds(&self) -> Vec<PromptKind> {
        self.requests()
            .iter()
            .map(|request| PromptKind::of(request.prompt()))
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(PromptKind) -> bool) -> usize {
        self.kinds().into_iter().filter(|kind| predicate(*kind)).count()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_text(&self, req: &TextRequest) -> StoryloomResult<Option<String>> {
        self.requests.lock().unwrap().push(req.clone());

        match PromptKind::of(req.prompt()) {
            PromptKind::Brief => self.brief.resolve(),
            PromptKind::Scene(ordinal) => match self.scenes.get(&ordinal) {
                Some(response) => response.resolve(),
                None => Ok(Some(format!("Body of scene {}.", ordinal))),
            },
            PromptKind::Summary => match &self.summary {
                Some(response) => response.resolve(),
                None => {
                    let content = req.prompt().rsplit("\n\n").next().unwrap_or_default();
                    Ok(Some(format!("Summary: {}", content)))
                }
            },
            PromptKind::Meta => self.meta.resolve(),
            PromptKind::Unknown => Ok(None),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Image generator with one scripted answer.
///
/// When watching a story, it records the stored story as it stands while
/// each call is in flight.
pub struct MockImageGenerator {
    response: MockResponse,
    requests: Mutex<Vec<ImageRequest>>,
    watched: Mutex<Option<(InMemoryStoryStore, StoryId)>>,
    in_flight: Mutex<Vec<Story>>,
}

impl MockImageGenerator {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
            watched: Mutex::new(None),
            in_flight: Mutex::new(Vec::new()),
        }
    }

    pub fn watch(&self, store: &InMemoryStoryStore, story_id: StoryId) {
        *self.watched.lock().unwrap() = Some((store.clone(), story_id));
    }

    /// Stored story seen during each call.
    pub fn in_flight(&self) -> Vec<Story> {
        self.in_flight.lock().unwrap().clone()
    }

    pub fn succeeding() -> Self {
        Self::new(MockResponse::text("https://images.test/cover.png"))
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, req: &ImageRequest) -> StoryloomResult<Option<String>> {
        self.requests.lock().unwrap().push(req.clone());

        let watched = self.watched.lock().unwrap().clone();
        if let Some((store, story_id)) = watched
            && let Some(story) = store.get_story_by_id(story_id).await?
        {
            self.in_flight.lock().unwrap().push(story);
        }

        self.response.resolve()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Payment gate returning a fixed outcome.
pub struct MockPaymentGate {
    outcome: Option<PaymentOutcome>,
    calls: Mutex<usize>,
}

impl MockPaymentGate {
    pub fn new(outcome: PaymentOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            calls: Mutex::new(0),
        }
    }

    /// A gate whose call itself fails.
    pub fn failing() -> Self {
        Self {
            outcome: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PaymentGate for MockPaymentGate {
    async fn request_payment(&self, _story: &Story) -> StoryloomResult<PaymentOutcome> {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone().ok_or_else(|| {
            StoryloomError::from(storyloom_error::PaymentError::new("gateway unreachable"))
        })
    }
}

/// Events seen by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Step(GenerationStep),
    Busy(GenerationStep, bool),
    PaymentPending(bool),
    Error(String, Option<String>),
    ScrollToTop,
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<GenerationStep> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Step(step) => Some(step),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Error(message, _) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl GenerationListener for RecordingListener {
    fn step_changed(&self, _story_id: StoryId, step: GenerationStep) {
        self.push(Event::Step(step));
    }

    fn busy_changed(&self, _story_id: StoryId, step: GenerationStep, busy: bool) {
        self.push(Event::Busy(step, busy));
    }

    fn payment_pending(&self, _story_id: StoryId, pending: bool) {
        self.push(Event::PaymentPending(pending));
    }

    fn notify_error(&self, message: &str, description: Option<&str>) {
        self.push(Event::Error(
            message.to_string(),
            description.map(str::to_string),
        ));
    }

    fn scroll_to_top(&self, _story_id: StoryId) {
        self.push(Event::ScrollToTop);
    }
}

/// Everything a test needs to drive and inspect a generator.
pub struct Harness {
    pub text: Arc<MockTextGenerator>,
    pub image: Arc<MockImageGenerator>,
    pub store: Arc<InMemoryStoryStore>,
    pub gate: Arc<MockPaymentGate>,
    pub listener: Arc<RecordingListener>,
    pub generator: StoryGenerator,
}

impl Harness {
    pub fn new(text: MockTextGenerator, image: MockImageGenerator, gate: MockPaymentGate) -> Self {
        let text = Arc::new(text);
        let image = Arc::new(image);
        let store = Arc::new(InMemoryStoryStore::new());
        let gate = Arc::new(gate);
        let listener = Arc::new(RecordingListener::default());

        let generator = StoryGenerator::new(
            text.clone(),
            image.clone(),
            store.clone(),
            store.clone(),
            gate.clone(),
        )
        .with_listener(listener.clone());

        Self {
            text,
            image,
            store,
            gate,
            listener,
            generator,
        }
    }

    /// Default mocks; the gate cancels so unpaid stories never generate.
    pub fn default_mocks() -> Self {
        Self::new(
            MockTextGenerator::new(),
            MockImageGenerator::succeeding(),
            MockPaymentGate::new(PaymentOutcome::Cancelled),
        )
    }
}

/// A paid story, not yet stored.
pub fn paid_story(title: &str) -> Story {
    Story::new(title)
        .with_premise("A girl and a lighthouse")
        .with_payment_transaction("txn-1")
}
