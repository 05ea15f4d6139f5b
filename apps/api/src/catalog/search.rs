use crate::models::clothing::ClothingItem;

/// Free-text catalog search used by the browse endpoint.
///
/// The query is lower-cased and split on whitespace. An item matches when any
/// keyword is a substring of its lower-cased name or color. A blank query
/// matches everything.
pub fn keyword_search(items: Vec<ClothingItem>, query: &str) -> Vec<ClothingItem> {
    let query = query.to_lowercase();
    let keywords: Vec<&str> = query.split_whitespace().collect();
    if keywords.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            let name = item.name.to_lowercase();
            let color = item.color.to_lowercase();
            keywords
                .iter()
                .any(|kw| name.contains(kw) || color.contains(kw))
        })
        .collect()
}
