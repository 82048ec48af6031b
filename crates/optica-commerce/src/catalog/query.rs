//! Catalog query builder: filters, sort keys, pagination.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Products fetched per page.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Frame colors offered by the filter dropdown.
pub const FRAME_COLOR_OPTIONS: &[&str] = &[
    "Denim-Ace",
    "Black",
    "Tortoise",
    "Grey",
    "Blue",
    "Brown",
    "Gold",
];

/// Sort keys understood by the product API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortBy {
    /// Sort by creation time.
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    /// Sort by discounted price.
    #[serde(rename = "discount_price_inr")]
    DiscountPrice,
    /// Sort by discount percentage.
    #[serde(rename = "discount_percentage")]
    DiscountPercentage,
}

impl SortBy {
    /// Get the query parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::DiscountPrice => "discount_price_inr",
            SortBy::DiscountPercentage => "discount_percentage",
        }
    }
}

impl FromStr for SortBy {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortBy::CreatedAt),
            "discount_price_inr" => Ok(SortBy::DiscountPrice),
            "discount_percentage" => Ok(SortBy::DiscountPercentage),
            _ => Err(CommerceError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    /// Get the query parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CommerceError::UnknownSortOrder(s.to_string())),
        }
    }
}

/// The sort presets offered by the listing's sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortPreset {
    /// Newest first.
    #[default]
    NewestFirst,
    /// Oldest first.
    OldestFirst,
    /// Price: low to high.
    PriceLowToHigh,
    /// Price: high to low.
    PriceHighToLow,
    /// Highest discount.
    HighestDiscount,
}

impl SortPreset {
    /// All presets in dropdown order.
    pub const ALL: &'static [SortPreset] = &[
        SortPreset::NewestFirst,
        SortPreset::OldestFirst,
        SortPreset::PriceLowToHigh,
        SortPreset::PriceHighToLow,
        SortPreset::HighestDiscount,
    ];

    /// The sort key and direction this preset maps to.
    pub fn sort(&self) -> (SortBy, SortOrder) {
        match self {
            SortPreset::NewestFirst => (SortBy::CreatedAt, SortOrder::Desc),
            SortPreset::OldestFirst => (SortBy::CreatedAt, SortOrder::Asc),
            SortPreset::PriceLowToHigh => (SortBy::DiscountPrice, SortOrder::Asc),
            SortPreset::PriceHighToLow => (SortBy::DiscountPrice, SortOrder::Desc),
            SortPreset::HighestDiscount => (SortBy::DiscountPercentage, SortOrder::Desc),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortPreset::NewestFirst => "Newest First",
            SortPreset::OldestFirst => "Oldest First",
            SortPreset::PriceLowToHigh => "Price: Low to High",
            SortPreset::PriceHighToLow => "Price: High to Low",
            SortPreset::HighestDiscount => "Highest Discount",
        }
    }
}

/// Frame sizes offered by the filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameSize {
    #[serde(rename = "Small")]
    Small,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Large")]
    Large,
    #[serde(rename = "Extra Large")]
    ExtraLarge,
}

impl FrameSize {
    /// All sizes in dropdown order.
    pub const ALL: &'static [FrameSize] = &[
        FrameSize::Small,
        FrameSize::Medium,
        FrameSize::Large,
        FrameSize::ExtraLarge,
    ];

    /// Get the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameSize::Small => "Small",
            FrameSize::Medium => "Medium",
            FrameSize::Large => "Large",
            FrameSize::ExtraLarge => "Extra Large",
        }
    }
}

impl FromStr for FrameSize {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Small" => Ok(FrameSize::Small),
            "Medium" => Ok(FrameSize::Medium),
            "Large" => Ok(FrameSize::Large),
            "Extra Large" => Ok(FrameSize::ExtraLarge),
            _ => Err(CommerceError::UnknownFrameSize(s.to_string())),
        }
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional catalog filters. An unset field is omitted from the request
/// entirely; empty strings are treated as unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProductFilters {
    /// Minimum discounted price.
    pub min_price: Option<Money>,
    /// Maximum discounted price.
    pub max_price: Option<Money>,
    /// Frame color name.
    pub frame_color: Option<String>,
    /// Frame size.
    pub frame_size: Option<FrameSize>,
    /// Minimum average review rating (1-5).
    pub min_rating: Option<u8>,
    /// Free-text search term.
    pub search: Option<String>,
}

impl ProductFilters {
    /// Create an all-empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price range.
    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the frame color.
    pub fn with_frame_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.frame_color = (!color.is_empty()).then_some(color);
        self
    }

    /// Set the frame size.
    pub fn with_frame_size(mut self, size: FrameSize) -> Self {
        self.frame_size = Some(size);
        self
    }

    /// Set the minimum rating, clamped to the 1-5 scale.
    pub fn with_min_rating(mut self, rating: u8) -> Self {
        self.min_rating = Some(rating.clamp(1, 5));
        self
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    /// Check whether every filter is unset.
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.frame_color.is_none()
            && self.frame_size.is_none()
            && self.min_rating.is_none()
            && self.search.is_none()
    }
}

/// A paginated, filtered, sorted catalog query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductQuery {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
    /// Sort key.
    pub sort_by: SortBy,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Active filters.
    pub filters: ProductFilters,
}

impl ProductQuery {
    /// Create a query for the first page with default sort and no filters.
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            filters: ProductFilters::new(),
        }
    }

    /// Set the page, clamped to 1.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Set the sort key and direction.
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Set the filters.
    pub fn with_filters(mut self, filters: ProductFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Build the request parameters. Pagination and sort are always sent;
    /// each filter field is sent only when it carries a value.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
        ];

        let filters = &self.filters;
        if let Some(min) = filters.min_price {
            params.push(("minPrice", min.rupees().to_string()));
        }
        if let Some(max) = filters.max_price {
            params.push(("maxPrice", max.rupees().to_string()));
        }
        if let Some(color) = &filters.frame_color {
            if !color.is_empty() {
                params.push(("frame_color", color.clone()));
            }
        }
        if let Some(size) = filters.frame_size {
            params.push(("frame_size", size.as_str().to_string()));
        }
        if let Some(rating) = filters.min_rating {
            params.push(("minRating", rating.to_string()));
        }
        if let Some(search) = &filters.search {
            if !search.is_empty() {
                params.push(("search", search.clone()));
            }
        }

        params
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_query_params() {
        let params = ProductQuery::new().to_params();
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "limit"), Some("6"));
        assert_eq!(param(&params, "sortBy"), Some("createdAt"));
        assert_eq!(param(&params, "sortOrder"), Some("desc"));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_unset_filters_are_omitted() {
        let query = ProductQuery::new()
            .with_filters(ProductFilters::new().with_frame_color("").with_search(""));
        let params = query.to_params();
        assert_eq!(param(&params, "frame_color"), None);
        assert_eq!(param(&params, "search"), None);
    }

    #[test]
    fn test_set_filters_are_named_params() {
        let filters = ProductFilters::new()
            .with_price_range(Some(Money::new(500)), Some(Money::new(3000)))
            .with_frame_color("Black")
            .with_frame_size(FrameSize::ExtraLarge)
            .with_min_rating(4)
            .with_search("aviator");
        let params = ProductQuery::new().with_filters(filters).to_params();

        assert_eq!(param(&params, "minPrice"), Some("500"));
        assert_eq!(param(&params, "maxPrice"), Some("3000"));
        assert_eq!(param(&params, "frame_color"), Some("Black"));
        assert_eq!(param(&params, "frame_size"), Some("Extra Large"));
        assert_eq!(param(&params, "minRating"), Some("4"));
        assert_eq!(param(&params, "search"), Some("aviator"));
    }

    #[test]
    fn test_page_clamped_to_one() {
        assert_eq!(ProductQuery::new().with_page(0).page, 1);
        assert_eq!(ProductQuery::new().with_page(-3).page, 1);
    }

    #[test]
    fn test_min_rating_clamped() {
        let filters = ProductFilters::new().with_min_rating(9);
        assert_eq!(filters.min_rating, Some(5));
    }

    #[test]
    fn test_sort_preset_mapping() {
        let (by, order) = SortPreset::HighestDiscount.sort();
        assert_eq!(by, SortBy::DiscountPercentage);
        assert_eq!(order, SortOrder::Desc);
        assert_eq!(SortPreset::NewestFirst.sort().0, SortBy::CreatedAt);
        assert_eq!(SortPreset::ALL.len(), 5);
    }

    #[test]
    fn test_sort_key_roundtrip() {
        for key in ["createdAt", "discount_price_inr", "discount_percentage"] {
            assert_eq!(key.parse::<SortBy>().unwrap().as_str(), key);
        }
        assert!("relevance".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_frame_size_wire_values() {
        assert_eq!(FrameSize::ExtraLarge.as_str(), "Extra Large");
        assert_eq!("Extra Large".parse::<FrameSize>(), Ok(FrameSize::ExtraLarge));
        assert!("Tiny".parse::<FrameSize>().is_err());
    }
}
