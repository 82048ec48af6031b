//! Domain types for the Optica eyewear storefront.
//!
//! This crate holds the server-owned catalog model and the client-owned
//! query model shared by the API client and the controllers:
//!
//! - **Catalog**: products, reviews, paginated result pages
//! - **Query**: filters, sort keys, pagination parameters
//! - **Cart**: aggregate pricing over saved products
//!
//! # Example
//!
//! ```rust,ignore
//! use optica_commerce::prelude::*;
//!
//! let query = ProductQuery::new()
//!     .with_sort(SortBy::DiscountPrice, SortOrder::Asc)
//!     .with_filters(ProductFilters::new().with_frame_size(FrameSize::Medium));
//!
//! for (name, value) in query.to_params() {
//!     println!("{name}={value}");
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod user;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;
pub use user::User;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::user::User;

    // Catalog
    pub use crate::catalog::{
        FrameSize, Product, ProductFilters, ProductPage, ProductQuery, Review, SortBy, SortOrder,
        SortPreset, DEFAULT_PAGE_SIZE, FRAME_COLOR_OPTIONS,
    };

    // Cart
    pub use crate::cart::CartPricing;
}
