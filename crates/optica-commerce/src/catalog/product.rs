//! Product and review types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Server-owned and immutable once fetched; field names pin the wire format
/// the product API uses. Fields other than the identifier default when the
/// server omits them so a sparse record still renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Human-facing product code shown in the technical details.
    #[serde(default)]
    pub product_id: String,
    /// Model number.
    #[serde(default)]
    pub model_no: String,
    /// Frame color name (open set, e.g. "Tortoise" or "Denim-Ace").
    #[serde(default)]
    pub frame_color: String,
    /// Frame size label (e.g. "Medium").
    #[serde(default)]
    pub frame_size: String,
    /// Frame width in millimetres.
    #[serde(rename = "frame_width", default)]
    pub frame_width_mm: i64,
    /// Frame dimensions label (e.g. "52-18-140").
    #[serde(default)]
    pub frame_dimensions: String,
    /// List price.
    #[serde(rename = "price_inr", default)]
    pub price: Money,
    /// Discounted price.
    #[serde(rename = "discount_price_inr", default)]
    pub discount_price: Money,
    /// Discount percentage as advertised by the server.
    #[serde(default)]
    pub discount_percentage: i64,
    /// Image URLs in display order; the first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Name to display in listings, falling back when the model number
    /// is missing.
    pub fn display_name(&self) -> &str {
        if self.model_no.is_empty() {
            "Product"
        } else {
            &self.model_no
        }
    }

    /// The primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Mean review rating, 0.0 when there are no reviews.
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / self.reviews.len() as f64
    }

    /// Number of reviews.
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Amount saved off the list price.
    pub fn savings(&self) -> Money {
        self.price.saturating_sub(self.discount_price)
    }
}

/// A customer review. Read-only on the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    /// Author label.
    #[serde(default)]
    pub user: String,
    /// Star rating on a 1-5 scale.
    pub rating: u8,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_reviews(ratings: &[u8]) -> Product {
        Product {
            id: ProductId::new("p1"),
            product_id: "OPT-001".to_string(),
            model_no: "VC-E15112".to_string(),
            frame_color: "Black".to_string(),
            frame_size: "Medium".to_string(),
            frame_width_mm: 138,
            frame_dimensions: "50-20-140".to_string(),
            price: Money::new(2000),
            discount_price: Money::new(1400),
            discount_percentage: 30,
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            reviews: ratings
                .iter()
                .map(|&rating| Review {
                    user: "reviewer".to_string(),
                    rating,
                    comment: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_average_rating() {
        let product = product_with_reviews(&[5, 4, 3]);
        assert!((product.average_rating() - 4.0).abs() < f64::EPSILON);
        assert_eq!(product.review_count(), 3);
    }

    #[test]
    fn test_average_rating_empty() {
        let product = product_with_reviews(&[]);
        assert_eq!(product.average_rating(), 0.0);
    }

    #[test]
    fn test_primary_image_is_first() {
        let product = product_with_reviews(&[]);
        assert_eq!(product.primary_image(), Some("a.jpg"));
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut product = product_with_reviews(&[]);
        product.model_no.clear();
        assert_eq!(product.display_name(), "Product");
    }

    #[test]
    fn test_product_deserializes_wire_format() {
        let json = r#"{
            "_id": "660a1",
            "product_id": "OPT-042",
            "model_no": "VC-S13970",
            "frame_color": "Tortoise",
            "frame_size": "Large",
            "frame_width": 140,
            "frame_dimensions": "52-18-145",
            "price_inr": 3500,
            "discount_price_inr": 2100,
            "discount_percentage": 40,
            "images": ["front.jpg"],
            "reviews": [{"user": "Asha", "rating": 4, "comment": "sturdy"}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "660a1");
        assert_eq!(product.price, Money::new(3500));
        assert_eq!(product.discount_price, Money::new(2100));
        assert_eq!(product.frame_width_mm, 140);
        assert_eq!(product.reviews[0].rating, 4);
    }

    #[test]
    fn test_product_tolerates_sparse_record() {
        let product: Product = serde_json::from_str(r#"{"_id": "p9"}"#).unwrap();
        assert_eq!(product.display_name(), "Product");
        assert_eq!(product.primary_image(), None);
        assert!(product.price.is_zero());
    }
}
