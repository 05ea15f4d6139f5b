// Catalog: intake normalization, persistence and browsing of clothing items.

pub mod handlers;
pub mod intake;
pub mod search;
pub mod store;
