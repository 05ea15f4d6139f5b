use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::intake::{normalize_upload, RawUpload, UploadField};
use crate::catalog::search::keyword_search;
use crate::errors::AppError;
use crate::models::clothing::ClothingItem;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub filter: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub clothes: Vec<ClothingItem>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: i64,
    pub item: ClothingItem,
}

/// GET /api/v1/clothes?filter=
pub async fn handle_list_clothes(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    let clothes = state.catalog.list_all().await?;
    Ok(Json(CatalogResponse {
        clothes: keyword_search(clothes, &query.filter),
    }))
}

/// POST /api/v1/clothes
///
/// Multipart brand upload. Text parts are matched by form key; the `image`
/// part is stored under the upload dir. Missing parts get their defaults.
pub async fn handle_upload_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut raw = RawUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let key = field.name().unwrap_or_default().to_string();
        match UploadField::from_form_key(&key) {
            Some(UploadField::ImageUrl) => {
                raw.image_url = state.uploads.save_image_field(field).await?;
            }
            Some(upload_field) => raw.set(upload_field, field.text().await?),
            None => debug!("Ignoring unknown upload form part '{key}'"),
        }
    }

    let input = normalize_upload(raw);
    let id = state.catalog.insert(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id,
            item: input.into_item(id),
        }),
    ))
}

/// GET /api/v1/clothes/:id
pub async fn handle_get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClothingItem>, AppError> {
    let item = state
        .catalog
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;
    Ok(Json(item))
}
