//! `helpdoc sync` — Fetch the document once and report how it parses.
//!
//! The section cache lives inside each process, so this is a reachability
//! and parsing check. A running gateway syncs through `POST /api/sync`.

use std::sync::Arc;

use helpdoc_core::store::KnowledgeStore;
use helpdoc_gateway::SHARE_GUIDANCE;
use helpdoc_knowledge::InMemoryStore;

pub async fn run(document_id: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(document_id)?;
    let store = Arc::new(InMemoryStore::new());
    let pipeline = helpdoc_gateway::build_pipeline(
        &config,
        store.clone(),
        helpdoc_providers::build_from_config(&config),
    );

    let report = match pipeline.sync_configured().await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Sync failed: {e}");
            if e.kind() == helpdoc_core::ErrorKind::AccessDenied {
                eprintln!("   {SHARE_GUIDANCE}");
            }
            return Err(e.into());
        }
    };

    if report.sections_count == 0 {
        println!("⚠️  The document parsed into no sections. Is it empty?");
        return Ok(());
    }

    println!("✅ Synced {} section(s)", report.sections_count);
    for section in store.sections() {
        println!("   {:>3}. {}", section.section_index + 1, section.title);
    }

    Ok(())
}
