use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Size tokens used when a submission carries none.
pub const DEFAULT_SIZES: &[&str] = &["S", "M", "L"];

/// A persisted catalog row with its size list already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub color: String,
    pub sizes: Vec<String>,
    pub image_url: String,
    pub affiliate_link: String,
    pub brand_story: String,
}

/// A new item after input normalization. Every field is already defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItemInput {
    pub name: String,
    pub price: Decimal,
    pub color: String,
    pub sizes: Vec<String>,
    pub image_url: String,
    pub affiliate_link: String,
    pub brand_story: String,
}

impl ClothingItemInput {
    /// Attaches a store-assigned id.
    pub fn into_item(self, id: i64) -> ClothingItem {
        ClothingItem {
            id,
            name: self.name,
            price: self.price,
            color: self.color,
            sizes: self.sizes,
            image_url: self.image_url,
            affiliate_link: self.affiliate_link,
            brand_story: self.brand_story,
        }
    }
}

/// Raw `clothes` row as SQLite stores it: price and sizes are text.
#[derive(Debug, Clone, FromRow)]
pub struct ClothingRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub color: String,
    pub sizes: String,
    pub image_url: String,
    pub affiliate_link: String,
    pub brand_story: String,
}

/// Splits a comma-delimited size string into trimmed, non-empty tokens.
/// Falls back to [`DEFAULT_SIZES`] when nothing survives.
pub fn parse_sizes(raw: &str) -> Vec<String> {
    let sizes: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if sizes.is_empty() {
        DEFAULT_SIZES.iter().map(|s| s.to_string()).collect()
    } else {
        sizes
    }
}

/// Inverse of [`parse_sizes`] for storage.
pub fn join_sizes(sizes: &[String]) -> String {
    sizes.join(",")
}
