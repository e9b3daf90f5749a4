//! Migration CLI tool.
//!
//! Reads the connection string from `DATABASE_URL` or `-u <url>`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(migration::Migrator).await;
}
