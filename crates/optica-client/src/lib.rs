//! REST API client for the Optica storefront backend.
//!
//! The backend is the source of truth for the catalog, cart, wishlist, and
//! orders; this crate binds its endpoints behind the [`StorefrontApi`]
//! trait so controllers can be driven against the real transport or an
//! in-memory fake. The HTTP transport owns timeout policy; nothing here
//! retries.

pub mod api;
pub mod error;
pub mod http;
pub mod token;

pub use api::{
    AuthResponse, CartEnvelope, CartItem, HttpApi, LoginRequest, ProductRef, RegisterRequest,
    StorefrontApi, WishlistCheck, WishlistEnvelope,
};
pub use error::ApiError;
pub use http::{ClientConfig, HttpClient};
pub use token::AuthToken;
