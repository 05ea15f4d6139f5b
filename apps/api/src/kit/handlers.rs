//! Axum route handlers for kit assembly and single-item try-on.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::intake::resolve_user_photo;
use crate::errors::AppError;
use crate::kit::assembler::{assemble_kit, Budget, KitEntry};
use crate::models::clothing::ClothingItem;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct KitResponse {
    pub kit: Vec<KitEntry>,
    pub total_price: Decimal,
    pub budget: Budget,
    pub user_photo: String,
    /// Echoed from the form; the kit itself is not size-filtered.
    pub requested_size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TryOnQuery {
    pub user_photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TryOnResponse {
    pub item: ClothingItem,
    pub try_on: String,
    pub user_photo: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/kit
///
/// Multipart shopping form: `preferences`, optional `size`, optional `photo`.
/// The catalog is read once; the kit is computed over that snapshot.
pub async fn handle_assemble_kit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<KitResponse>, AppError> {
    let mut preferences = String::new();
    let mut requested_size = None;
    let mut photo = None;

    while let Some(field) = multipart.next_field().await? {
        let key = field.name().unwrap_or_default().to_string();
        match key.as_str() {
            "preferences" => preferences = field.text().await?,
            "size" => {
                requested_size = Some(field.text().await?.trim().to_string())
                    .filter(|s| !s.is_empty());
            }
            "photo" => photo = state.uploads.save_image_field(field).await?,
            _ => debug!("Ignoring unknown shopping form part '{key}'"),
        }
    }

    let user_photo = resolve_user_photo(photo);
    let items = state.catalog.list_all().await?;
    let budget = state.config.kit_budget;
    let kit = assemble_kit(&items, &preferences, budget, &user_photo, state.try_on.as_ref());

    info!(
        "Assembled kit of {} items (total {}) from {} catalog items",
        kit.entries.len(),
        kit.total_price,
        items.len()
    );

    Ok(Json(KitResponse {
        kit: kit.entries,
        total_price: kit.total_price,
        budget,
        user_photo,
        requested_size,
    }))
}

/// GET /api/v1/clothes/:id/try-on?user_photo=
pub async fn handle_try_on(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TryOnQuery>,
) -> Result<Json<TryOnResponse>, AppError> {
    let item = state
        .catalog
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;

    let user_photo = resolve_user_photo(query.user_photo);
    let try_on = state
        .try_on
        .synthesize(&item.name, &item.color, &item.image_url, &user_photo);

    Ok(Json(TryOnResponse {
        item,
        try_on,
        user_photo,
    }))
}
