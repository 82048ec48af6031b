//! Cart list controller.

use crate::error::StoreError;
use crate::session::SessionState;
use optica_client::StorefrontApi;
use optica_commerce::cart::CartPricing;
use optica_commerce::catalog::Product;
use optica_commerce::ids::ProductId;

/// Controller for the cart page.
///
/// The server owns the cart; the local list is a cache rebuilt on every
/// [`refresh`](Self::refresh). Removal is confirm-before-mutate: an entry
/// leaves local state only after the server acknowledges the delete.
#[derive(Debug)]
pub struct CartController<A> {
    api: A,
    products: Vec<Product>,
    loading: bool,
}

impl<A: StorefrontApi> CartController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            products: Vec::new(),
            loading: false,
        }
    }

    /// The cached cart products.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Aggregate pricing over the cached entries.
    pub fn pricing(&self) -> CartPricing {
        CartPricing::from_products(&self.products)
    }

    /// Fetch the cart. Requires a session; a failed fetch leaves the
    /// cached list unchanged.
    pub async fn refresh(&mut self, session: &SessionState) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;

        self.loading = true;
        let result = self.api.cart(token).await;
        self.loading = false;

        match result {
            Ok(products) => {
                tracing::debug!(count = products.len(), "cart refreshed");
                self.products = products;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "cart fetch failed");
                Err(err.into())
            }
        }
    }

    /// Remove a product. The entry is dropped from local state only after
    /// the server confirms the deletion.
    pub async fn remove(
        &mut self,
        session: &SessionState,
        product_id: &ProductId,
    ) -> Result<(), StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;
        self.api.remove_from_cart(product_id, token).await?;
        self.products.retain(|p| &p.id != product_id);
        tracing::debug!(product = %product_id, "removed from cart");
        Ok(())
    }
}
