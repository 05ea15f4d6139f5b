pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::catalog::handlers as catalog;
use crate::kit::handlers as kit;
use crate::state::AppState;
use crate::uploads::{MAX_UPLOAD_BYTES, UPLOADS_ROUTE};

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route(
            "/api/v1/clothes",
            get(catalog::handle_list_clothes).post(catalog::handle_upload_item),
        )
        .route("/api/v1/clothes/:id", get(catalog::handle_get_item))
        .route("/api/v1/clothes/:id/try-on", get(kit::handle_try_on))
        // Kit API
        .route("/api/v1/kit", post(kit::handle_assemble_kit))
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
