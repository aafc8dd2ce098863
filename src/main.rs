use anyhow::Result;
use testrec::catalog::Catalog;
use testrec::server;
use testrec::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    log::info!("Starting testrec v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    log::info!("Catalog path: {}", config.catalog_path().display());

    let catalog = Catalog::load(config.catalog_path())?;
    log::info!("Loaded {} catalog item(s)", catalog.len());

    server::serve(catalog, &config.bind_addr()).await?;

    Ok(())
}
