//! Kit Assembler: preference filtering plus first-fit budget accumulation.
//!
//! Pure and stateless. The caller loads one catalog snapshot and hands it in;
//! nothing here touches storage.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::kit::preferences::Preferences;
use crate::kit::try_on::TryOnSynthesizer;
use crate::models::clothing::ClothingItem;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Kit budget used when none is configured: 150.00.
pub const DEFAULT_KIT_BUDGET: Decimal = Decimal::from_parts(15000, 0, 0, false, 2);

/// Spending ceiling for one kit. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Budget(Decimal);

impl Budget {
    pub fn new(amount: Decimal) -> Option<Self> {
        (amount > Decimal::ZERO).then_some(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self(DEFAULT_KIT_BUDGET)
    }
}

/// One accepted item with its try-on text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KitEntry {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub color: String,
    pub sizes: Vec<String>,
    pub image_url: String,
    pub affiliate_link: String,
    pub brand_story: String,
    pub try_on: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kit {
    pub entries: Vec<KitEntry>,
    pub total_price: Decimal,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds the kit for one shopping request.
///
/// 1. Parse `preferences` into tags
/// 2. Narrow the catalog through every triggered predicate, in chain order
/// 3. Walk survivors in catalog order, accepting each item that still fits the budget
/// 4. Attach sizes and try-on text to every accepted item
pub fn assemble_kit(
    items: &[ClothingItem],
    preferences: &str,
    budget: Budget,
    user_photo: &str,
    synthesizer: &dyn TryOnSynthesizer,
) -> Kit {
    let prefs = Preferences::parse(preferences);
    if !prefs.unrecognized.is_empty() {
        debug!("Ignoring unrecognized preference tokens: {:?}", prefs.unrecognized);
    }

    let candidates = filter_candidates(items, &prefs);
    let (accepted, total_price) = accumulate_within_budget(&candidates, budget);
    debug!(
        "Kit: {} catalog items, {} candidates, {} accepted, total {total_price}",
        items.len(),
        candidates.len(),
        accepted.len()
    );

    let entries = accepted
        .into_iter()
        .map(|item| KitEntry {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            color: item.color.clone(),
            sizes: item.sizes.clone(),
            image_url: item.image_url.clone(),
            affiliate_link: item.affiliate_link.clone(),
            brand_story: item.brand_story.clone(),
            try_on: synthesizer.synthesize(&item.name, &item.color, &item.image_url, user_photo),
        })
        .collect();

    Kit {
        entries,
        total_price,
    }
}

/// Applies each active predicate to the survivors of the previous one.
/// Catalog order is preserved.
pub fn filter_candidates<'a>(items: &'a [ClothingItem], prefs: &Preferences) -> Vec<&'a ClothingItem> {
    let mut survivors: Vec<&ClothingItem> = items.iter().collect();
    for predicate in prefs.active_predicates() {
        survivors.retain(|item| predicate.admits(item));
    }
    survivors
}

/// First-fit greedy accumulation. An item that would push the running total
/// past the budget, or past what `Decimal` can represent, is skipped for good;
/// later, cheaper items may still fit.
pub fn accumulate_within_budget<'a>(
    candidates: &[&'a ClothingItem],
    budget: Budget,
) -> (Vec<&'a ClothingItem>, Decimal) {
    let mut total = Decimal::ZERO;
    let mut accepted = Vec::new();

    for item in candidates {
        match total.checked_add(item.price) {
            Some(next) if next <= budget.amount() => {
                total = next;
                accepted.push(*item);
            }
            _ => {}
        }
    }

    (accepted, total)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::try_on::TemplateTryOn;

    fn item(id: i64, name: &str, cents: i64, color: &str) -> ClothingItem {
        ClothingItem {
            id,
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            color: color.to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            image_url: format!("/uploads/{id}.jpg"),
            affiliate_link: format!("https://flexoffers.com/{id}?tag=yourid"),
            brand_story: "story".to_string(),
        }
    }

    fn budget(cents: i64) -> Budget {
        Budget::new(Decimal::new(cents, 2)).unwrap()
    }

    fn kit_names(kit: &Kit) -> Vec<&str> {
        kit.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn mixed_catalog() -> Vec<ClothingItem> {
        vec![
            item(1, "Eco Tee", 2999, "Black"),
            item(2, "Floral Print Dress", 4500, "black/white"),
            item(3, "Running Shoes", 8000, "Black"),
            item(4, "Casual Shorts", 3499, "BLACK"),
            item(5, "Bucket Hat", 1500, "Beige"),
            item(6, "Vintage Jacket", 5999, "Blue"),
            item(7, "Print Shorts", 2500, "Navy"),
        ]
    }

    const TAG_COMBOS: &[&str] = &[
        "",
        "black",
        "plain",
        "no print",
        "no shoes",
        "shorts",
        "use photo hat",
        "plain, no print",
        "no print, shorts",
        "black, no shoes, no print",
        "vintage, whatever",
    ];

    #[test]
    fn test_unrecognized_tags_keep_full_catalog_in_order() {
        let catalog = mixed_catalog();
        let prefs = Preferences::parse("vintage, cozy, red");
        let ids: Vec<i64> = filter_candidates(&catalog, &prefs).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_no_print_never_admits_print_items() {
        let catalog = mixed_catalog();
        for extra in TAG_COMBOS {
            let prefs = Preferences::parse(&format!("no print, {extra}"));
            for candidate in filter_candidates(&catalog, &prefs) {
                assert!(
                    !candidate.name.to_lowercase().contains("print"),
                    "'{}' admitted with tags '{extra}'",
                    candidate.name
                );
            }
        }
    }

    #[test]
    fn test_black_filter_is_case_insensitive_substring() {
        let catalog = mixed_catalog();
        let ids: Vec<i64> = filter_candidates(&catalog, &Preferences::parse("black"))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_no_shoes_drops_shoes() {
        let catalog = mixed_catalog();
        let candidates = filter_candidates(&catalog, &Preferences::parse("no shoes"));
        assert!(candidates.iter().all(|i| i.id != 3));
        assert_eq!(candidates.len(), 6);
    }

    #[test]
    fn test_use_photo_hat_keeps_only_hats() {
        let catalog = mixed_catalog();
        let ids: Vec<i64> = filter_candidates(&catalog, &Preferences::parse("use photo hat"))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_use_photo_hat_without_hats_is_empty() {
        let catalog = vec![item(1, "Eco Tee", 1000, "Black")];
        let kit = assemble_kit(&catalog, "use photo hat", budget(15000), "/me.jpg", &TemplateTryOn);
        assert!(kit.entries.is_empty());
        assert_eq!(kit.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_kit_never_exceeds_budget() {
        let catalog = mixed_catalog();
        for tags in TAG_COMBOS {
            for cents in [1, 1500, 4000, 9999, 15000, 30000] {
                let b = budget(cents);
                let kit = assemble_kit(&catalog, tags, b, "/me.jpg", &TemplateTryOn);
                let summed: Decimal = kit.entries.iter().map(|e| e.price).sum();
                assert_eq!(summed, kit.total_price);
                assert!(kit.total_price <= b.amount(), "tags '{tags}' budget {cents}");
            }
        }
    }

    #[test]
    fn test_kit_is_subsequence_of_candidates() {
        let catalog = mixed_catalog();
        for tags in TAG_COMBOS {
            let candidate_ids: Vec<i64> = filter_candidates(&catalog, &Preferences::parse(tags))
                .iter()
                .map(|i| i.id)
                .collect();
            let kit = assemble_kit(&catalog, tags, budget(9000), "/me.jpg", &TemplateTryOn);

            let mut cursor = candidate_ids.iter();
            for entry in &kit.entries {
                assert!(
                    cursor.any(|id| *id == entry.id),
                    "entry {} out of order for tags '{tags}'",
                    entry.id
                );
            }
        }
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let catalog = mixed_catalog();
        let first = assemble_kit(&catalog, "no print", budget(15000), "/me.jpg", &TemplateTryOn);
        let second = assemble_kit(&catalog, "no print", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(first, second);
    }

    #[test]
    fn test_color_then_shorts_filter_can_empty_the_kit() {
        let catalog = vec![item(1, "A", 10000, "Black"), item(2, "B", 6000, "Black")];
        let kit = assemble_kit(&catalog, "black,shorts", budget(15000), "/me.jpg", &TemplateTryOn);
        assert!(kit.entries.is_empty());
        assert_eq!(kit.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_first_fit_rejects_item_that_overflows() {
        let catalog = vec![
            item(1, "Shorts X", 4000, "Black"),
            item(2, "Shorts Y", 13000, "Black"),
        ];
        let kit = assemble_kit(&catalog, "plain,shorts", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(kit_names(&kit), vec!["Shorts X"]);
        assert_eq!(kit.total_price, Decimal::new(4000, 2));
    }

    #[test]
    fn test_skipped_item_does_not_block_cheaper_followers() {
        let catalog = vec![
            item(1, "Coat", 10000, "Grey"),
            item(2, "Boots", 9000, "Brown"),
            item(3, "Socks", 500, "White"),
        ];
        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(kit_names(&kit), vec!["Coat", "Socks"]);
        assert_eq!(kit.total_price, Decimal::new(10500, 2));
    }

    #[test]
    fn test_price_at_decimal_max_is_skipped_not_overflowed() {
        let mut huge = item(2, "Gilded Gown", 0, "Gold");
        huge.price = Decimal::MAX;
        let catalog = vec![
            item(1, "Eco Tee", 1000, "Black"),
            huge,
            item(3, "Socks", 500, "White"),
        ];

        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(kit_names(&kit), vec!["Eco Tee", "Socks"]);
        assert_eq!(kit.total_price, Decimal::new(1500, 2));
    }

    #[test]
    fn test_uploaded_huge_price_does_not_break_assembly() {
        use crate::catalog::intake::{normalize_upload, RawUpload};

        let upload = |id: i64, name: &str, price: &str| {
            normalize_upload(RawUpload {
                name: Some(name.to_string()),
                price: Some(price.to_string()),
                ..Default::default()
            })
            .into_item(id)
        };
        let catalog = vec![
            upload(1, "Cap", "10"),
            upload(2, "Crown", "79228162514264337593543950335"),
        ];

        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(kit_names(&kit), vec!["Cap"]);
        assert_eq!(kit.total_price, Decimal::from(10));
    }

    #[test]
    fn test_exact_budget_fits() {
        let catalog = vec![item(1, "Suit", 15000, "Black")];
        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        assert_eq!(kit.entries.len(), 1);
    }

    #[test]
    fn test_single_item_over_budget_yields_empty_kit() {
        let catalog = vec![item(1, "Designer Coat", 15001, "Black")];
        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        assert!(kit.entries.is_empty());
        assert_eq!(kit.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_empty_catalog_yields_empty_kit() {
        let kit = assemble_kit(&[], "black, no print", budget(15000), "/me.jpg", &TemplateTryOn);
        assert!(kit.entries.is_empty());
        assert_eq!(kit.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_entries_carry_sizes_and_try_on() {
        let catalog = vec![item(1, "Eco Tee", 2999, "Black")];
        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &TemplateTryOn);
        let entry = &kit.entries[0];
        assert_eq!(entry.sizes, vec!["S", "M"]);
        assert_eq!(
            entry.try_on,
            TemplateTryOn.synthesize("Eco Tee", "Black", "/uploads/1.jpg", "/me.jpg")
        );
    }

    #[test]
    fn test_input_catalog_is_untouched() {
        let catalog = mixed_catalog();
        let before = catalog.clone();
        assemble_kit(&catalog, "plain, shorts", budget(5000), "/me.jpg", &TemplateTryOn);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_budget_must_be_positive() {
        assert!(Budget::new(Decimal::ZERO).is_none());
        assert!(Budget::new(Decimal::new(-1, 0)).is_none());
        assert_eq!(Budget::default().amount(), Decimal::new(15000, 2));
        assert_eq!(DEFAULT_KIT_BUDGET.to_string(), "150.00");
    }

    struct EchoPhoto;

    impl TryOnSynthesizer for EchoPhoto {
        fn synthesize(&self, item_name: &str, _: &str, _: &str, user_photo: &str) -> String {
            format!("{item_name} on {user_photo}")
        }
    }

    #[test]
    fn test_synthesizer_is_swappable() {
        let catalog = vec![item(1, "Eco Tee", 2999, "Black")];
        let kit = assemble_kit(&catalog, "", budget(15000), "/me.jpg", &EchoPhoto);
        assert_eq!(kit.entries[0].try_on, "Eco Tee on /me.jpg");
    }
}
