//! Try-on synthesis: the seam where a real AR rendering backend plugs in.
//!
//! Default: `TemplateTryOn` (pure string template, no I/O).
//!
//! `AppState` holds an `Arc<dyn TryOnSynthesizer>`; the kit assembler only
//! sees the trait, so swapping backends never touches it.

/// Produces the try-on text for one item on the shopper's avatar.
///
/// Implementations must be deterministic for identical input and must never
/// return an empty string.
pub trait TryOnSynthesizer: Send + Sync {
    fn synthesize(&self, item_name: &str, color: &str, image_url: &str, user_photo: &str)
        -> String;
}

/// Canned sentence standing in for an AR preview.
pub struct TemplateTryOn;

impl TryOnSynthesizer for TemplateTryOn {
    fn synthesize(
        &self,
        item_name: &str,
        color: &str,
        image_url: &str,
        _user_photo: &str,
    ) -> String {
        format!("AR Try-On: {item_name} in {color} fits your avatar perfectly! (Image: {image_url})")
    }
}
