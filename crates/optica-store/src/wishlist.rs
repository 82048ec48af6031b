//! Wishlist list controller.

use crate::error::StoreError;
use crate::session::SessionState;
use optica_client::StorefrontApi;
use optica_commerce::catalog::Product;
use optica_commerce::ids::ProductId;

/// Controller for the wishlist page.
///
/// Same caching discipline as the cart: the server is the source of
/// truth, the local list is rebuilt on refresh, and removal only mutates
/// local state after the server confirms.
#[derive(Debug)]
pub struct WishlistController<A> {
    api: A,
    products: Vec<Product>,
    loading: bool,
}

impl<A: StorefrontApi> WishlistController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            products: Vec::new(),
            loading: false,
        }
    }

    /// The cached wishlist products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Fetch the wishlist. Requires a session; a failed fetch leaves the
    /// cached list unchanged.
    pub async fn refresh(&mut self, session: &SessionState) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;

        self.loading = true;
        let result = self.api.wishlist(token).await;
        self.loading = false;

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "wishlist refreshed");
                self.products = products;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "wishlist fetch failed");
                Err(err.into())
            }
        }
    }

    /// Remove a product after server confirmation.
    pub async fn remove(
        &mut self,
        session: &SessionState,
        product_id: &ProductId,
    ) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;
        self.api.remove_from_wishlist(product_id, token).await?;
        self.products.retain(|p| &p.id != product_id);
        tracing::debug!(product = %product_id, "removed from wishlist");
        Ok(())
    }
}
