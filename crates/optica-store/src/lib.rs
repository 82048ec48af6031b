//! Application state and controllers for the Optica storefront.
//!
//! Each view in the storefront is backed by one controller here; the
//! controllers own all mutable state and expose named transitions, so a
//! view layer only renders and forwards events. State shared across views
//! (session, theme) is constructed explicitly and injected; nothing reads
//! ambient globals.
//!
//! - [`catalog`]: the product listing (paginated query, accumulated
//!   results, infinite-scroll continuation)
//! - [`detail`]: a single product (wishlist membership, cart and order
//!   actions)
//! - [`cart`] / [`wishlist`]: the saved-product lists
//! - [`session`] / [`theme`]: persisted cross-view state

pub mod cart;
pub mod catalog;
pub mod detail;
pub mod error;
pub mod session;
pub mod theme;
pub mod validate;
pub mod wishlist;

pub use cart::CartController;
pub use catalog::CatalogController;
pub use detail::{ProductDetailController, WishlistChange};
pub use error::StoreError;
pub use session::{Session, SessionState};
pub use theme::{Theme, ThemeState};
pub use wishlist::WishlistController;
