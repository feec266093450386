//! AnswerGenerator trait — the abstraction over the language-model backend.
//!
//! The retrieval pipeline hands the generator a fixed system instruction and a
//! user message carrying the assembled context. It gets natural-language text
//! back and treats the backend as a black box.
//!
//! Implementations: Anthropic Messages API (`helpdoc-providers`), scripted
//! mocks in tests.

use async_trait::async_trait;

use crate::error::GenerationError;

/// The core AnswerGenerator trait.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// A human-readable name for this backend (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Produce an answer for `user_content` under `system_instruction`.
    async fn generate_answer(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> std::result::Result<String, GenerationError>;

    /// Health check — can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, GenerationError> {
        Ok(true)
    }
}
