//! `helpdoc sections` — Preview how a local export splits into sections.

use std::path::PathBuf;

pub async fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;

    let sections = helpdoc_knowledge::parse(&text);
    if sections.is_empty() {
        println!("⚠️  {} contains no text", file.display());
        return Ok(());
    }

    println!("📄 {} section(s) in {}\n", sections.len(), file.display());
    for section in &sections {
        let preview: String = section.content.chars().take(60).collect();
        println!(
            "  {:>3}. {} ({} chars)\n       {}",
            section.section_index + 1,
            section.title,
            section.content.chars().count(),
            preview.replace('\n', " ")
        );
    }

    Ok(())
}
