//! Upload normalization.
//!
//! Every "missing field → default value" rule lives in [`UploadField::default_value`].
//! `normalize_upload` runs once at the boundary, so the store and the kit
//! assembler only ever see fully populated input.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::clothing::{parse_sizes, ClothingItemInput};

/// Avatar reference used when a shopper does not upload a photo.
pub const DEFAULT_USER_PHOTO: &str = "/uploads/default_avatar.jpg";

/// Fields of the brand upload form that carry a documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    Name,
    Price,
    Color,
    Sizes,
    ImageUrl,
    AffiliateLink,
    BrandStory,
}

impl UploadField {
    pub const ALL: [UploadField; 7] = [
        UploadField::Name,
        UploadField::Price,
        UploadField::Color,
        UploadField::Sizes,
        UploadField::ImageUrl,
        UploadField::AffiliateLink,
        UploadField::BrandStory,
    ];

    pub const fn form_key(self) -> &'static str {
        match self {
            UploadField::Name => "name",
            UploadField::Price => "price",
            UploadField::Color => "color",
            UploadField::Sizes => "sizes",
            UploadField::ImageUrl => "image",
            UploadField::AffiliateLink => "affiliate_link",
            UploadField::BrandStory => "brand_story",
        }
    }

    pub const fn default_value(self) -> &'static str {
        match self {
            UploadField::Name => "Unnamed item",
            UploadField::Price => "0",
            UploadField::Color => "Unknown",
            UploadField::Sizes => "S,M,L",
            UploadField::ImageUrl => "/uploads/default.jpg",
            UploadField::AffiliateLink => "https://flexoffers.com/default?tag=yourid",
            UploadField::BrandStory => "Brand story not provided",
        }
    }

    pub fn from_form_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.form_key() == key)
    }
}

/// Upload form as received. `None` and blank strings both mean "absent".
#[derive(Debug, Clone, Default)]
pub struct RawUpload {
    pub name: Option<String>,
    pub price: Option<String>,
    pub color: Option<String>,
    pub sizes: Option<String>,
    pub image_url: Option<String>,
    pub affiliate_link: Option<String>,
    pub brand_story: Option<String>,
}

impl RawUpload {
    pub fn set(&mut self, field: UploadField, value: String) {
        let slot = match field {
            UploadField::Name => &mut self.name,
            UploadField::Price => &mut self.price,
            UploadField::Color => &mut self.color,
            UploadField::Sizes => &mut self.sizes,
            UploadField::ImageUrl => &mut self.image_url,
            UploadField::AffiliateLink => &mut self.affiliate_link,
            UploadField::BrandStory => &mut self.brand_story,
        };
        *slot = Some(value);
    }
}

/// Applies the default table to a raw upload.
pub fn normalize_upload(raw: RawUpload) -> ClothingItemInput {
    let price_text = text_or_default(raw.price, UploadField::Price);
    let price = parse_price(&price_text);
    let sizes_text = text_or_default(raw.sizes, UploadField::Sizes);

    ClothingItemInput {
        name: text_or_default(raw.name, UploadField::Name),
        price,
        color: text_or_default(raw.color, UploadField::Color),
        sizes: parse_sizes(&sizes_text),
        image_url: text_or_default(raw.image_url, UploadField::ImageUrl),
        affiliate_link: text_or_default(raw.affiliate_link, UploadField::AffiliateLink),
        brand_story: text_or_default(raw.brand_story, UploadField::BrandStory),
    }
}

/// Resolves the shopper's avatar reference.
pub fn resolve_user_photo(photo: Option<String>) -> String {
    photo
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_PHOTO.to_string())
}

fn text_or_default(value: Option<String>, field: UploadField) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            debug!(
                "Upload field '{}' absent; using default '{}'",
                field.form_key(),
                field.default_value()
            );
            field.default_value().to_string()
        }
    }
}

/// Parses a non-negative decimal price. Anything else becomes zero.
fn parse_price(text: &str) -> Decimal {
    match Decimal::from_str(text) {
        Ok(price) if !price.is_sign_negative() => price,
        _ => {
            debug!("Price '{text}' is not a non-negative decimal; defaulting to 0");
            Decimal::ZERO
        }
    }
}
