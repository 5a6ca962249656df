//! Partial listing descriptions used for price suggestions.

/// A listing that is not yet priced, or whose price is being re-checked.
///
/// Optional numeric fields fall back to zero when a computation needs them;
/// `price` is the caller's own figure and is returned unchanged when no
/// comparable listings exist.
///
/// # Examples
/// ```
/// use homestay_core::ListingDraft;
///
/// let draft = ListingDraft::new("VILLA", "Đà Lạt", 4, 8).with_rating(4.8);
/// assert_eq!(draft.rating, Some(4.8));
/// assert!(draft.price.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListingDraft {
    /// Property category, compared exactly against catalog items.
    pub kind: String,
    /// Primary region, compared exactly against catalog items.
    pub city: String,
    /// Number of bedrooms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bedrooms: u32,
    /// Maximum number of guests.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_guests: u32,
    /// Expected rating, if already known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f64>,
    /// Price stated by the caller.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: Option<f64>,
}

impl ListingDraft {
    /// Describe a listing by category, region and capacity.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        city: impl Into<String>,
        bedrooms: u32,
        max_guests: u32,
    ) -> Self {
        Self {
            kind: kind.into(),
            city: city.into(),
            bedrooms,
            max_guests,
            rating: None,
            price: None,
        }
    }

    /// Attach an expected rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach the caller's stated price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}
