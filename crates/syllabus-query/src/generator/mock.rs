//! Configurable mock generator for tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerationError, TextGenerator};

/// What the mock returns from every call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Empty,
}

/// A [`TextGenerator`] that never touches the network.
///
/// Records every prompt it receives so tests can assert on grounding.
pub struct MockGenerator {
    name: String,
    response: MockResponse,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(name: impl Into<String>, response: MockResponse) -> Self {
        Self {
            name: name.into(),
            response,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: impl Into<String>) -> Self {
        Self::new("mock", MockResponse::Text(text.into()))
    }

    pub fn failing() -> Self {
        Self::new("mock", MockResponse::Empty)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let result = match &self.response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Empty => Err(GenerationError::EmptyResponse),
        };
        Box::pin(async move { result })
    }
}
