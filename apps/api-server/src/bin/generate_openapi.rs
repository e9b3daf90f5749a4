//! Write the OpenAPI document to a file.
//!
//! Usage: `generate-openapi [path]` (default `openapi.json`).

use anyhow::Context;

use api_server::config::AppConfig;
use api_server::openapi;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    let config = AppConfig::from_env();

    let json = openapi::build(&config.public_base_url)
        .to_pretty_json()
        .context("failed to serialize OpenAPI document")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {path}"))?;

    println!("OpenAPI document written to {path}");
    Ok(())
}
