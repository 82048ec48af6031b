//! Paginated product result pages.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// One page of catalog results as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    /// The products on this page, in server order.
    pub products: Vec<Product>,
    /// Total products matching the query.
    #[serde(rename = "totalProducts")]
    pub total_products: i64,
    /// The page the server served (1-indexed).
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    /// Total pages for the query.
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl ProductPage {
    /// Whether a further page exists.
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Number of products on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
