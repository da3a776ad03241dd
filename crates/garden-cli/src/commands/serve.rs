//! HTTP server command

use super::load_config;
use anyhow::{Context, Result};
use garden_gen::GardenService;
use std::sync::Arc;

pub struct ServeArgs<'a> {
    pub config: Option<&'a str>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub provider: Option<String>,
}

pub fn run(args: ServeArgs<'_>) -> Result<()> {
    let mut config = load_config(args.config)?;
    if let Some(provider) = &args.provider {
        config.set_provider_for_all(provider);
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let service = GardenService::from_config(&config).context("Failed to set up generators")?;
    for (kind, provider) in service.provider_names() {
        println!("  {:<8} -> {}", kind, provider);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    println!("Garden server on http://{}", addr);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(garden_server::serve(&addr, Arc::new(service)))
        .context("Server error")?;
    Ok(())
}
