//! Subcommand implementations.

pub mod ask;
pub mod onboard;
pub mod sections;
pub mod serve;
pub mod status;
pub mod sync;

use helpdoc_config::AppConfig;

/// Load config, applying a `--document-id` override when given.
pub(crate) fn load_config(
    document_id: Option<String>,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(id) = document_id {
        config.document.document_id = Some(id);
    }
    Ok(config)
}
