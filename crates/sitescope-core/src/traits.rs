// crates/sitescope-core/src/traits.rs
use crate::text::fold_key;

/// Anything that is keyed by a region identifier.
///
/// Implemented by point records, summaries and boundaries so grouping and
/// the choropleth join can treat them uniformly.
pub trait RegionKeyed {
    fn region_id(&self) -> &str;
}

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes accent-insensitive and case-insensitive
/// comparisons based on [`fold_key`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`], and get:
/// - [`NameMatch::is_named`] for equality on the folded form
/// - [`NameMatch::name_contains`] for substring matches on the folded form
///
/// # Examples
/// ```rust
/// use sitescope_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Zürich").is_named("zurich"));
/// assert!(Place("Graubünden").name_contains("bunden"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
