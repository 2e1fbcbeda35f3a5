//! `theme-watch`: follows the desktop color scheme and persists it.
//!
//! Loads `.env`, reads [`ThemeConfig`] from the environment, and polls the
//! OS preference until Ctrl-C. With `THEME_STORAGE_PATH` set the theme is
//! written to that JSON file; otherwise persistence is skipped.

use std::time::Duration;

use theme_store::{
    DocumentSink, FileStorage, MemoryAttributes, NoopSink, PersistenceSink, SystemPreference, ThemeConfig, ThemeStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match ThemeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid theme configuration");
            std::process::exit(2);
        }
    };

    let sink: Box<dyn PersistenceSink> = match &config.storage_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "persisting theme to file");
            Box::new(DocumentSink::new(FileStorage::new(path), MemoryAttributes::new(), &config))
        }
        None => {
            tracing::warn!("THEME_STORAGE_PATH not set; theme persistence disabled");
            Box::new(NoopSink)
        }
    };

    let source = SystemPreference::new();
    let store = ThemeStore::new(&source, sink);
    let _log = store.subscribe(|theme| tracing::info!(%theme, "current theme"));

    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    tracing::info!(interval_secs = config.poll_interval_secs, "watching OS color scheme");
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                source.poll();
            }
            _ = &mut shutdown => {
                tracing::info!(theme = %store.get(), "shutting down");
                break;
            }
        }
    }
}
