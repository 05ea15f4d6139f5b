use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::models::clothing::{
    join_sizes, parse_sizes, ClothingItem, ClothingItemInput, ClothingRow,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Corrupt catalog row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },
}

impl TryFrom<ClothingRow> for ClothingItem {
    type Error = CatalogError;

    fn try_from(row: ClothingRow) -> Result<Self, Self::Error> {
        let price = Decimal::from_str(&row.price).map_err(|e| CatalogError::CorruptRow {
            id: row.id,
            reason: format!("price '{}' is not a decimal: {e}", row.price),
        })?;

        Ok(ClothingItem {
            id: row.id,
            name: row.name,
            price,
            color: row.color,
            sizes: parse_sizes(&row.sizes),
            image_url: row.image_url,
            affiliate_link: row.affiliate_link,
            brand_story: row.brand_story,
        })
    }
}

/// Handle to the `clothes` table. Cheap to clone; all clones share one pool.
///
/// Rows are append-only: there is no update or delete.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persists a normalized item and returns its freshly assigned id.
    pub async fn insert(&self, item: &ClothingItemInput) -> Result<i64, CatalogError> {
        let id = sqlx::query(
            r#"
            INSERT INTO clothes
                (name, price, color, sizes, image_url, affiliate_link, brand_story)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.name)
        .bind(item.price.to_string())
        .bind(&item.color)
        .bind(join_sizes(&item.sizes))
        .bind(&item.image_url)
        .bind(&item.affiliate_link)
        .bind(&item.brand_story)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!("Inserted clothing item {id} ('{}')", item.name);
        Ok(id)
    }

    /// Every row in insertion order.
    pub async fn list_all(&self) -> Result<Vec<ClothingItem>, CatalogError> {
        let rows = sqlx::query_as::<_, ClothingRow>("SELECT * FROM clothes ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ClothingItem::try_from).collect()
    }

    /// Looks up one row. An unknown id is `Ok(None)`, not an error.
    pub async fn get(&self, id: i64) -> Result<Option<ClothingItem>, CatalogError> {
        let row = sqlx::query_as::<_, ClothingRow>("SELECT * FROM clothes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ClothingItem::try_from).transpose()
    }

    pub async fn count(&self) -> Result<i64, CatalogError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM clothes")
            .fetch_one(&self.pool)
            .await?)
    }

    /// Inserts the sample catalog when the table is empty.
    /// Returns how many rows were written.
    pub async fn seed_samples(&self) -> Result<usize, CatalogError> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        let samples = sample_catalog();
        for item in &samples {
            self.insert(item).await?;
        }
        info!("Seeded {} sample catalog items", samples.len());
        Ok(samples.len())
    }
}

/// Starter rows for an empty catalog.
pub fn sample_catalog() -> Vec<ClothingItemInput> {
    let sample = |name: &str, cents: i64, color: &str, sizes: &str, slug: &str, story: &str| {
        ClothingItemInput {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            color: color.to_string(),
            sizes: parse_sizes(sizes),
            image_url: format!("/uploads/{slug}.jpg"),
            affiliate_link: format!("https://flexoffers.com/{slug}?tag=yourid"),
            brand_story: story.to_string(),
        }
    };

    vec![
        sample(
            "Eco Tee - Brand A (15k followers)",
            2999,
            "Black",
            "S,M,L",
            "tee",
            "Brand A: Sustainable cotton from upcycled fabrics, launched by a 20k IG creator.",
        ),
        sample(
            "Vintage Jacket - Brand B (50k followers)",
            5999,
            "Blue",
            "M,L",
            "jacket",
            "Brand B: Retro vibes from a 60k TikTok designer, eco-conscious production.",
        ),
        sample(
            "Casual Shorts - Brand C (30k followers)",
            3499,
            "Black",
            "S,M",
            "shorts",
            "Brand C: Comfortable designs from a 30k IG artisan.",
        ),
    ]
}
