//! Scripted generators for end-to-end runs. No network.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storyloom::{
    ImageGenerator, ImageRequest, InMemoryStoryStore, PrepaidGate, StoryGenerator,
    StoryloomResult, TextGenerator, TextRequest,
};

pub const BRIEF: &str = "1. The Map: Ada finds a map in the attic.\n2. The Forest: She follows it into the woods.";

pub const META: &str = r#"{"storyTitles": ["Ada and the Attic Map"], "description": "A small adventure",
"summary": "Ada follows a map", "coverText": "A girl holding a map under tall trees",
"coverTextEn": "A girl holding a map under tall trees"}"#;

/// Answers every prompt of the bundled catalog with canned text.
#[derive(Default)]
pub struct ScriptedText {
    prompts: Mutex<Vec<String>>,
}

impl ScriptedText {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    async fn generate_text(&self, req: &TextRequest) -> StoryloomResult<Option<String>> {
        let prompt = req.prompt().to_string();
        self.prompts.lock().unwrap().push(prompt.clone());

        let answer = if prompt.contains("Summarize the following scene") {
            "A short summary.".to_string()
        } else if prompt.contains("Answer with a single JSON object") {
            META.to_string()
        } else if prompt.contains("Write scene ") {
            "Once upon a time.".to_string()
        } else {
            BRIEF.to_string()
        };
        Ok(Some(answer))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// Always returns the same cover URL.
#[derive(Default)]
pub struct ScriptedImage {
    requests: Mutex<Vec<ImageRequest>>,
}

impl ScriptedImage {
    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImage {
    async fn generate_image(&self, req: &ImageRequest) -> StoryloomResult<Option<String>> {
        self.requests.lock().unwrap().push(req.clone());
        Ok(Some("https://images.test/ada.png".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

pub struct Setup {
    pub text: Arc<ScriptedText>,
    pub image: Arc<ScriptedImage>,
    pub store: Arc<InMemoryStoryStore>,
    pub generator: StoryGenerator,
}

/// Generator over scripted clients and a prepaid gate holding `transaction`.
pub fn setup(transaction: Option<&str>) -> Setup {
    let text = Arc::new(ScriptedText::default());
    let image = Arc::new(ScriptedImage::default());
    let store = Arc::new(InMemoryStoryStore::new());
    let generator = StoryGenerator::new(
        text.clone(),
        image.clone(),
        store.clone(),
        store.clone(),
        Arc::new(PrepaidGate::new(transaction.map(str::to_string))),
    );
    Setup {
        text,
        image,
        store,
        generator,
    }
}
