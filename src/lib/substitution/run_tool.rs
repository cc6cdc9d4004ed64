use std::error::Error;

use log::info;
use tokio::net::TcpListener;

use super::{
    dsb_source::{DsbMobileClient, DsbSource},
    entry_source::{EntrySource, StaticSource},
    helpers::log_config,
    models::{Config, SourceKind},
    portal_scraper::ScrapingSource,
    server::{create_router, AppState},
};

pub async fn run<S: EntrySource>(source: S, config: &Config) -> Result<(), Box<dyn Error>> {
    let app = create_router(AppState::new(source), &config.cors_allowed_origins);
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Wire the source selected in the config and serve until the process stops.
pub async fn run_configured(config: Config) -> Result<(), Box<dyn Error>> {
    log_config(&config);
    match config.source {
        SourceKind::Static => run(StaticSource::sample(), &config).await,
        SourceKind::Scraping => run(ScrapingSource::from_config(&config), &config).await,
        SourceKind::Dsb => {
            let client = DsbMobileClient::from_config(&config)?;
            run(DsbSource::new(client), &config).await
        }
    }
}
