//! `helpdoc status` — Show configuration status.

use helpdoc_config::AppConfig;

fn on_off(flag: bool, on: &'static str, off: &'static str) -> &'static str {
    if flag { on } else { off }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let adapters = helpdoc_providers::build_from_config(&config);
    let generator_ready = adapters.generator.health_check().await.unwrap_or(false);

    println!("📄 HelpDoc Status");
    println!("=================");
    println!("  Config dir:    {}", AppConfig::config_dir().display());
    println!(
        "  Document:      {}",
        config.document.document_id.as_deref().unwrap_or("(not configured)")
    );
    println!("  Export base:   {}", config.document.export_base_url);
    println!(
        "  Fetch on miss: {}",
        on_off(config.document.fetch_on_miss, "enabled", "disabled")
    );
    println!("  Model:         {}", config.provider.model);
    println!("  Temperature:   {}", config.provider.temperature);
    println!("  Max tokens:    {}", config.provider.max_tokens);
    println!("  API key:       {}", on_off(config.has_api_key(), "set", "missing"));
    println!(
        "  Generator:     {} ({})",
        adapters.generator.name(),
        on_off(generator_ready, "ready", "not ready")
    );
    println!("  Max sections:  {}", config.retrieval.max_sections);
    println!("  Gateway:       {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  Cron secret:   {}",
        on_off(config.sync.cron_secret.is_some(), "set", "not set")
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `helpdoc onboard` first");
    }

    Ok(())
}
