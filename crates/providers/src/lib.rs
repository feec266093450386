//! External adapters for HelpDoc.
//!
//! [`GoogleDocsSource`] implements `helpdoc_core::DocumentSource` and
//! [`AnthropicGenerator`] implements `helpdoc_core::AnswerGenerator`.
//! [`build_from_config`] wires both from an `AppConfig`.

pub mod anthropic;
pub mod google_docs;

pub use anthropic::AnthropicGenerator;
pub use google_docs::GoogleDocsSource;

use helpdoc_config::AppConfig;
use helpdoc_core::generator::AnswerGenerator;
use helpdoc_core::source::DocumentSource;
use std::sync::Arc;

/// The two collaborators the retrieval pipeline needs.
pub struct Adapters {
    pub source: Arc<dyn DocumentSource>,
    pub generator: Arc<dyn AnswerGenerator>,
}

/// Build the document source and answer generator from configuration.
///
/// A missing API key still yields a generator; it reports `NotConfigured`
/// on first use so sync and status keep working without one.
pub fn build_from_config(config: &AppConfig) -> Adapters {
    let source = GoogleDocsSource::with_timeout(config.document.fetch_timeout_secs)
        .with_base_url(&config.document.export_base_url);

    let provider = &config.provider;
    let api_key = provider.api_key.clone().unwrap_or_default();
    let generator = AnthropicGenerator::with_timeout(api_key, provider.timeout_secs)
        .with_base_url(&provider.api_url)
        .with_model(&provider.model)
        .with_max_tokens(provider.max_tokens)
        .with_temperature(provider.temperature);

    if !config.has_api_key() {
        tracing::warn!("No Anthropic API key configured; chat answers will fail until one is set");
    }

    Adapters {
        source: Arc::new(source),
        generator: Arc::new(generator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_named_adapters() {
        let adapters = build_from_config(&AppConfig::default());
        assert_eq!(adapters.source.name(), "google_docs");
        assert_eq!(adapters.generator.name(), "anthropic");
    }

    #[tokio::test]
    async fn missing_key_surfaces_on_generation() {
        let adapters = build_from_config(&AppConfig::default());
        let err = adapters.generator.generate_answer("s", "u").await.unwrap_err();
        assert!(matches!(
            err,
            helpdoc_core::GenerationError::NotConfigured(_)
        ));
    }
}
