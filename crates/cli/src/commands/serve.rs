//! `helpdoc serve` — Start the HTTP API server.

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(None)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("📄 HelpDoc Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Document:  {}",
        config.document.document_id.as_deref().unwrap_or("(not configured)")
    );
    let cron_auth = if config.sync.cron_secret.is_some() {
        "bearer secret"
    } else {
        "open"
    };
    println!("   Cron auth: {cron_auth}");

    helpdoc_gateway::start(config).await?;

    Ok(())
}
