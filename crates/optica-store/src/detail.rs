//! Single-product view controller.

use crate::error::StoreError;
use crate::session::SessionState;
use optica_client::StorefrontApi;
use optica_commerce::catalog::Product;

/// Direction a wishlist toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    /// The product was added to the wishlist.
    Added,
    /// The product was removed from the wishlist.
    Removed,
}

/// Controller for the single-product page.
///
/// Manages wishlist membership and the three mutating actions. Each action
/// carries its own busy gate so one action's in-flight state never blocks
/// another; a busy action returns without issuing a second request. Every
/// mutating action requires a session and fails locally with
/// [`StoreError::AuthRequired`], making no request, when anonymous.
#[derive(Debug)]
pub struct ProductDetailController<A> {
    api: A,
    product: Product,
    in_wishlist: bool,
    wishlist_busy: bool,
    cart_busy: bool,
    order_busy: bool,
}

impl<A: StorefrontApi> ProductDetailController<A> {
    /// Create a controller for one product.
    pub fn new(api: A, product: Product) -> Self {
        Self {
            api,
            product,
            in_wishlist: false,
            wishlist_busy: false,
            cart_busy: false,
            order_busy: false,
        }
    }

    /// The product being shown.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Current wishlist membership.
    pub fn in_wishlist(&self) -> bool {
        self.in_wishlist
    }

    /// Whether a wishlist request is in flight.
    pub fn wishlist_busy(&self) -> bool {
        self.wishlist_busy
    }

    /// Whether an add-to-cart request is in flight.
    pub fn cart_busy(&self) -> bool {
        self.cart_busy
    }

    /// Whether a buy-now request is in flight.
    pub fn order_busy(&self) -> bool {
        self.order_busy
    }

    /// Fetch wishlist membership on mount. Anonymous visitors skip the
    /// request and membership stays false; that is not an error.
    pub async fn check_membership(&mut self, session: &SessionState) -> Result<(), StoreError> {
        let Some(token) = session.token() else {
            self.in_wishlist = false;
            return Ok(());
        };
        self.in_wishlist = self.api.wishlist_contains(&self.product.id, token).await?;
        Ok(())
    }

    /// Toggle wishlist membership: an add request when absent, a remove
    /// request when present. Membership only flips after the server
    /// confirms; on failure it is left unchanged. Returns `None` when a
    /// wishlist request was already in flight.
    pub async fn toggle_wishlist(
        &mut self,
        session: &SessionState,
    ) -> Result<Option<WishlistChange>, StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;
        if self.wishlist_busy {
            return Ok(None);
        }

        self.wishlist_busy = true;
        let result = if self.in_wishlist {
            self.api.remove_from_wishlist(&self.product.id, token).await
        } else {
            self.api.add_to_wishlist(&self.product.id, token).await
        };
        self.wishlist_busy = false;

        match result {
            Ok(()) => {
                self.in_wishlist = !self.in_wishlist;
                let change = if self.in_wishlist {
                    WishlistChange::Added
                } else {
                    WishlistChange::Removed
                };
                tracing::debug!(product = %self.product.id, ?change, "wishlist updated");
                Ok(Some(change))
            }
            Err(err) => {
                tracing::warn!(product = %self.product.id, error = %err, "wishlist toggle failed");
                Err(err.into())
            }
        }
    }

    /// Add the product to the cart. Returns `false` when an add-to-cart
    /// request was already in flight. The cart list itself is owned by its
    /// own view and refetched there.
    pub async fn add_to_cart(&mut self, session: &SessionState) -> Result<bool, StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;
        if self.cart_busy {
            return Ok(false);
        }

        self.cart_busy = true;
        let result = self.api.add_to_cart(&self.product.id, token).await;
        self.cart_busy = false;

        result.map(|()| true).map_err(Into::into)
    }

    /// Create an order for the product. Returns `false` when a buy-now
    /// request was already in flight.
    pub async fn buy_now(&mut self, session: &SessionState) -> Result<bool, StoreError> {
        let token = session.token().ok_or(StoreError::AuthRequired)?;
        if self.order_busy {
            return Ok(false);
        }

        self.order_busy = true;
        let result = self.api.create_order(&self.product.id, token).await;
        self.order_busy = false;

        result.map(|()| true).map_err(Into::into)
    }
}
