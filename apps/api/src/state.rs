use std::sync::Arc;

use crate::catalog::store::CatalogStore;
use crate::config::Config;
use crate::kit::try_on::TryOnSynthesizer;
use crate::uploads::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub uploads: UploadStore,
    pub config: Config,
    /// Pluggable try-on backend. Default: TemplateTryOn.
    pub try_on: Arc<dyn TryOnSynthesizer>,
}
