pub mod handlers;
pub mod pages;
pub mod routes;

pub use routes::*;

use crate::api::pages::PageContext;
use crate::config::Config;
use crate::ml::{ModelArtifacts, PredictionPipeline};
use crate::progress::ProgressIndicator;
use crate::session::SessionStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub sessions: SessionStore,
    pub progress: ProgressIndicator,
    pub page: Arc<PageContext>,
    pub cookie_name: Arc<str>,
    pub static_dir: PathBuf,
    pub request_timeout: Duration,
}

impl AppState {
    /// Build the full state from configuration and loaded model artifacts
    pub fn from_config(config: &Config, artifacts: ModelArtifacts) -> Self {
        let pipeline = Arc::new(PredictionPipeline::new(artifacts));
        let sessions = SessionStore::new(&config.session);

        Self {
            pipeline,
            sessions,
            progress: ProgressIndicator::new(&config.progress),
            page: Arc::new(PageContext {
                banner_url: format!("/static/{}", config.server.banner_image),
            }),
            cookie_name: Arc::from(config.session.cookie_name.as_str()),
            static_dir: config.server.static_dir.clone(),
            request_timeout: config.server.request_timeout(),
        }
    }
}
