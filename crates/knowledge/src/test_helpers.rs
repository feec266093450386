//! Scripted stand-ins for the document source and answer generator.

use std::sync::Mutex;

use helpdoc_core::error::{GenerationError, SourceError};
use helpdoc_core::generator::AnswerGenerator;
use helpdoc_core::source::DocumentSource;

/// A generator that returns queued answers in order and records every request.
pub struct ScriptedGenerator {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    call_count: Mutex<usize>,
    last_request: Mutex<Option<(String, String)>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::with_results(vec![Err(error)])
    }

    fn with_results(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// `(system_instruction, user_content)` of the most recent call.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_answer(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, GenerationError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        *self.last_request.lock().unwrap() =
            Some((system_instruction.to_string(), user_content.to_string()));

        let response = responses.get(*count).cloned().unwrap_or_else(|| {
            Err(GenerationError::InvalidResponse(format!(
                "ScriptedGenerator: no more responses (call #{}, have {})",
                *count,
                responses.len()
            )))
        });
        *count += 1;
        response
    }
}

/// A source that always returns the same text or the same error.
pub struct StaticSource {
    result: Result<String, SourceError>,
    call_count: Mutex<usize>,
    last_document_id: Mutex<Option<String>>,
}

impl StaticSource {
    pub fn new(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            call_count: Mutex::new(0),
            last_document_id: Mutex::new(None),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            result: Err(error),
            call_count: Mutex::new(0),
            last_document_id: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_document_id(&self) -> Option<String> {
        self.last_document_id.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_document_text(&self, document_id: &str) -> Result<String, SourceError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_document_id.lock().unwrap() = Some(document_id.to_string());
        self.result.clone()
    }
}
