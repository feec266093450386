//! `helpdoc ask` — Answer one question, fetching the document on demand.

use std::sync::Arc;

use helpdoc_core::answer::AnswerOutcome;
use helpdoc_knowledge::InMemoryStore;

pub async fn run(
    question: String,
    document_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(document_id)?;

    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    ANTHROPIC_API_KEY = 'sk-ant-...'");
        eprintln!("    HELPDOC_API_KEY   = 'sk-ant-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", helpdoc_config::AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let pipeline = helpdoc_gateway::build_pipeline(
        &config,
        Arc::new(InMemoryStore::new()),
        helpdoc_providers::build_from_config(&config),
    );

    let answer = pipeline.answer(&question).await?;
    println!("\n{}\n", answer.answer);

    if answer.outcome == AnswerOutcome::Answered && !answer.citations.is_empty() {
        println!("Sources:");
        for citation in &answer.citations {
            println!(
                "  [Section {}: {}] {}",
                citation.section_index + 1,
                citation.section,
                citation.excerpt
            );
        }
        println!();
    }

    Ok(())
}
