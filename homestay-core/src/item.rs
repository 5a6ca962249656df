//! Catalog items: the rentable properties ranked by the engine.
//!
//! Items are read-only inputs. Construction is infallible so callers can
//! assemble fixtures cheaply; [`CatalogItem::validate`] enforces the numeric
//! and geographic invariants at the boundary where raw records enter the
//! engine.

use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Unordered set of amenity tags such as `"wifi"` or `"pool"`.
pub type Amenities = BTreeSet<String>;

/// Presentation fields carried alongside an item.
///
/// The engine never reads these; they are passed through so callers can
/// render ranked results without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayInfo {
    /// Human readable listing title.
    pub title: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Display name of the host, when known.
    pub host_name: Option<String>,
}

/// A rentable property in the catalog.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use homestay_core::CatalogItem;
///
/// let item = CatalogItem::new(7, "VILLA", "Đà Lạt", Coord { x: 108.44, y: 11.94 })
///     .with_price(3_500_000.0)
///     .with_capacity(4, 8)
///     .with_rating(4.9, 120)
///     .with_amenities(["pool", "wifi"]);
///
/// assert_eq!(item.id, 7);
/// assert!(item.amenities.contains("pool"));
/// assert!(item.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogItem {
    /// Unique identifier.
    pub id: u64,
    /// Property category, for example `VILLA` or `APARTMENT`.
    pub kind: String,
    /// Primary region (city).
    pub city: String,
    /// Secondary region (state or province).
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<String>,
    /// Nightly base price in an unspecified currency.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: f64,
    /// Number of bedrooms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bedrooms: u32,
    /// Maximum number of guests.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_guests: u32,
    /// Average review rating in `0.0..=5.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: f64,
    /// Number of reviews behind [`CatalogItem::rating`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub review_count: u32,
    /// Amenity tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub amenities: Amenities,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Whether the listing is promoted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub featured: bool,
    /// Pass-through presentation fields.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: DisplayInfo,
}

/// Errors returned by [`CatalogItem::validate`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogItemError {
    /// A numeric attribute was negative or not finite.
    #[error("item {id}: {field} must be a finite, non-negative number (got {value})")]
    InvalidNumber {
        /// Identifier of the offending item.
        id: u64,
        /// Name of the attribute.
        field: &'static str,
        /// Value found on the item.
        value: f64,
    },
    /// The rating fell outside the rating scale.
    #[error("item {id}: rating {rating} is outside 0..=5")]
    RatingOutOfRange {
        /// Identifier of the offending item.
        id: u64,
        /// Rating found on the item.
        rating: f64,
    },
    /// Latitude fell outside `-90..=90`.
    #[error("item {id}: latitude {latitude} is outside -90..=90")]
    LatitudeOutOfRange {
        /// Identifier of the offending item.
        id: u64,
        /// Latitude found on the item.
        latitude: f64,
    },
    /// Longitude fell outside `-180..=180`.
    #[error("item {id}: longitude {longitude} is outside -180..=180")]
    LongitudeOutOfRange {
        /// Identifier of the offending item.
        id: u64,
        /// Longitude found on the item.
        longitude: f64,
    },
}

impl CatalogItem {
    /// Construct an item with zeroed numeric attributes and no amenities.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use homestay_core::CatalogItem;
    ///
    /// let item = CatalogItem::new(1, "APARTMENT", "Hà Nội", Coord { x: 105.85, y: 21.03 });
    /// assert_eq!(item.price, 0.0);
    /// assert!(item.amenities.is_empty());
    /// ```
    #[must_use]
    pub fn new(
        id: u64,
        kind: impl Into<String>,
        city: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            city: city.into(),
            state: None,
            price: 0.0,
            bedrooms: 0,
            max_guests: 0,
            rating: 0.0,
            review_count: 0,
            amenities: Amenities::new(),
            location,
            featured: false,
            display: DisplayInfo::default(),
        }
    }

    /// Set the secondary region.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the base price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set bedroom count and guest capacity.
    #[must_use]
    pub const fn with_capacity(mut self, bedrooms: u32, max_guests: u32) -> Self {
        self.bedrooms = bedrooms;
        self.max_guests = max_guests;
        self
    }

    /// Set the average rating and the number of reviews behind it.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Replace the amenity set.
    #[must_use]
    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the promoted flag.
    #[must_use]
    pub const fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Attach presentation fields.
    #[must_use]
    pub fn with_display(mut self, display: DisplayInfo) -> Self {
        self.display = display;
        self
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Popularity signal used when no personal history is available:
    /// `rating × review_count`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use homestay_core::CatalogItem;
    ///
    /// let item = CatalogItem::new(1, "VILLA", "Huế", Coord { x: 0.0, y: 0.0 })
    ///     .with_rating(4.5, 10);
    /// assert_eq!(item.popularity(), 45.0);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "popularity multiplies the rating by the review count"
    )]
    #[must_use]
    pub fn popularity(&self) -> f64 {
        self.rating * f64::from(self.review_count)
    }

    /// Check the numeric and geographic invariants.
    ///
    /// # Errors
    /// Returns [`CatalogItemError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), CatalogItemError> {
        if !is_non_negative(self.price) {
            return Err(CatalogItemError::InvalidNumber {
                id: self.id,
                field: "price",
                value: self.price,
            });
        }
        if !is_non_negative(self.rating) || self.rating > MAX_RATING {
            return Err(CatalogItemError::RatingOutOfRange {
                id: self.id,
                rating: self.rating,
            });
        }
        let latitude = self.latitude();
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CatalogItemError::LatitudeOutOfRange {
                id: self.id,
                latitude,
            });
        }
        let longitude = self.longitude();
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CatalogItemError::LongitudeOutOfRange {
                id: self.id,
                longitude,
            });
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
