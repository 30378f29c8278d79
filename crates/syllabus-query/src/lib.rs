pub mod format;
pub mod generator;
pub mod rules;

use std::path::Path;
use std::sync::Arc;

use syllabus_core::SyllabusDocument;

pub use generator::{GeminiGenerator, GenerationError, TextGenerator, grounded_prompt};
pub use rules::{Question, Rule, default_rules};

pub const UNAVAILABLE_MESSAGE: &str =
    "I'm sorry, the syllabus data is currently unavailable on the server.";
pub const ASSISTANT_DISABLED_MESSAGE: &str = "I couldn't find a specific answer for your query. \
The advanced AI assistant is currently disabled. \
Please ask about course details, semester subjects, vision, or mission.";
pub const GENERATION_FAILED_MESSAGE: &str = "Sorry, I encountered an error while trying to \
generate an AI-powered response. Please try again.";

/// How a question was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// No syllabus data is loaded.
    Unavailable,
    /// A keyword rule produced the answer.
    Rule { rule: &'static str, text: String },
    /// The model produced the answer.
    Generated(String),
    /// The model call failed.
    GenerationFailed,
    /// No rule matched and no model is configured.
    AssistantDisabled,
}

impl Answer {
    pub fn text(&self) -> &str {
        match self {
            Answer::Unavailable => UNAVAILABLE_MESSAGE,
            Answer::Rule { text, .. } | Answer::Generated(text) => text,
            Answer::GenerationFailed => GENERATION_FAILED_MESSAGE,
            Answer::AssistantDisabled => ASSISTANT_DISABLED_MESSAGE,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Answer::Unavailable)
    }
}

/// Everything needed to answer questions: the loaded document (if any),
/// its JSON for model grounding, the rule list and an optional model.
pub struct QueryContext {
    document: Option<SyllabusDocument>,
    document_json: String,
    rules: Vec<Rule>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl QueryContext {
    pub fn new(document: SyllabusDocument) -> Self {
        let document_json = serde_json::to_string_pretty(&document).unwrap_or_default();
        Self {
            document: Some(document),
            document_json,
            rules: default_rules(),
            generator: None,
        }
    }

    /// A context with no data. Every question gets [`Answer::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            document: None,
            document_json: String::new(),
            rules: default_rules(),
            generator: None,
        }
    }

    /// Load the document at `path`. Never fails: a missing or malformed
    /// file is logged and yields an unavailable context.
    pub fn load(path: &Path, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let context = match syllabus_core::load_document(path) {
            Ok(document) => {
                tracing::info!(
                    path = %path.display(),
                    semesters = document.semesters.len(),
                    "syllabus data loaded"
                );
                Self::new(document)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load syllabus data");
                Self::unavailable()
            }
        };
        match generator {
            Some(generator) => context.with_generator(generator),
            None => context,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn is_available(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&SyllabusDocument> {
        self.document.as_ref()
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Answer one question: first matching rule, then the model, then the
    /// fixed "assistant disabled" reply.
    pub async fn answer(&self, question: &str) -> Answer {
        let Some(document) = &self.document else {
            return Answer::Unavailable;
        };
        let question = Question::new(question);

        for rule in &self.rules {
            if let Some(text) = rule.apply(document, &question) {
                tracing::debug!(rule = rule.name, "question answered by rule");
                return Answer::Rule {
                    rule: rule.name,
                    text,
                };
            }
        }

        let Some(generator) = &self.generator else {
            return Answer::AssistantDisabled;
        };

        let prompt = grounded_prompt(&self.document_json, &question.text);
        match generator.generate(&prompt).await {
            Ok(text) => Answer::Generated(text),
            Err(e) => {
                tracing::error!(model = generator.name(), error = %e, "model call failed");
                Answer::GenerationFailed
            }
        }
    }
}
