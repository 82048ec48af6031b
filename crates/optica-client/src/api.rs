//! Storefront API surface: wire envelopes and endpoint bindings.

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::token::AuthToken;
use async_trait::async_trait;
use optica_commerce::catalog::{Product, ProductPage, ProductQuery};
use optica_commerce::ids::ProductId;
use optica_commerce::user::User;
use serde::{Deserialize, Serialize};

/// Request body carrying a product reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    /// The referenced product.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
}

impl ProductRef {
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

/// `GET /api/cart/get` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEnvelope {
    /// Saved cart entries.
    pub cart: Vec<CartItem>,
}

/// One cart entry; the server populates the product reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// The saved product.
    #[serde(rename = "productId")]
    pub product: Product,
}

/// `GET /api/wishlist/get` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEnvelope {
    /// Saved products.
    pub wishlist: Vec<Product>,
}

/// `GET /api/wishlist/check/{id}` response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WishlistCheck {
    #[serde(rename = "isInWishlist")]
    pub is_in_wishlist: bool,
}

/// `POST /api/auth/login` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Auth endpoint response envelope.
///
/// A successful login carries both `user` and `accessToken`; a rejected
/// attempt may still come back 2xx with only `error`/`message` set, so
/// every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthResponse {
    /// The authenticated user, when auth succeeded.
    #[serde(default)]
    pub user: Option<User>,
    /// Bearer credential, when auth succeeded.
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    /// Informational message.
    #[serde(default)]
    pub message: Option<String>,
    /// Server-reported failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// The storefront backend's API surface.
///
/// Controllers are generic over this trait; production code uses
/// [`HttpApi`], tests drive the controllers with an in-memory fake.
/// Catalog reads take an optional credential (the listing works for
/// anonymous visitors); everything else requires one.
#[async_trait]
pub trait StorefrontApi {
    /// Fetch one page of the catalog.
    async fn fetch_products(
        &self,
        query: &ProductQuery,
        token: Option<&AuthToken>,
    ) -> Result<ProductPage, ApiError>;

    /// Fetch the session's cart, unwrapped to the saved products.
    async fn cart(&self, token: &AuthToken) -> Result<Vec<Product>, ApiError>;

    /// Add a product to the cart.
    async fn add_to_cart(&self, product_id: &ProductId, token: &AuthToken)
        -> Result<(), ApiError>;

    /// Remove a product from the cart.
    async fn remove_from_cart(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError>;

    /// Fetch the session's wishlist.
    async fn wishlist(&self, token: &AuthToken) -> Result<Vec<Product>, ApiError>;

    /// Check wishlist membership for a product.
    async fn wishlist_contains(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<bool, ApiError>;

    /// Add a product to the wishlist.
    async fn add_to_wishlist(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError>;

    /// Remove a product from the wishlist.
    async fn remove_from_wishlist(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError>;

    /// Create an order for a single product.
    async fn create_order(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError>;

    /// Log in with email and password.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// Register a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
}

/// [`StorefrontApi`] implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: HttpClient,
}

impl HttpApi {
    /// Wrap a transport.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying transport.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn fetch_products(
        &self,
        query: &ProductQuery,
        token: Option<&AuthToken>,
    ) -> Result<ProductPage, ApiError> {
        let params = query.to_params();
        tracing::debug!(page = query.page, params = params.len(), "GET /api/products");
        self.http.get_json("/api/products", &params, token).await
    }

    async fn cart(&self, token: &AuthToken) -> Result<Vec<Product>, ApiError> {
        let envelope: CartEnvelope = self.http.get_json("/api/cart/get", &[], Some(token)).await?;
        Ok(envelope.cart.into_iter().map(|item| item.product).collect())
    }

    async fn add_to_cart(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        self.http
            .post_unit(
                "/api/cart/add",
                &ProductRef::new(product_id.clone()),
                Some(token),
            )
            .await
    }

    async fn remove_from_cart(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        let path = format!("/api/cart/remove/{}", product_id);
        self.http.delete_unit(&path, Some(token)).await
    }

    async fn wishlist(&self, token: &AuthToken) -> Result<Vec<Product>, ApiError> {
        let envelope: WishlistEnvelope = self
            .http
            .get_json("/api/wishlist/get", &[], Some(token))
            .await?;
        Ok(envelope.wishlist)
    }

    async fn wishlist_contains(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<bool, ApiError> {
        let path = format!("/api/wishlist/check/{}", product_id);
        let check: WishlistCheck = self.http.get_json(&path, &[], Some(token)).await?;
        Ok(check.is_in_wishlist)
    }

    async fn add_to_wishlist(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        self.http
            .post_unit(
                "/api/wishlist/add",
                &ProductRef::new(product_id.clone()),
                Some(token),
            )
            .await
    }

    async fn remove_from_wishlist(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        let path = format!("/api/wishlist/remove/{}", product_id);
        self.http.delete_unit(&path, Some(token)).await
    }

    async fn create_order(
        &self,
        product_id: &ProductId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        self.http
            .post_unit(
                "/api/order/create",
                &ProductRef::new(product_id.clone()),
                Some(token),
            )
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.http.post_json("/api/auth/login", request, None).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.http
            .post_json("/api/auth/register", request, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ref_serializes_camel_case() {
        let body = serde_json::to_string(&ProductRef::new(ProductId::new("p1"))).unwrap();
        assert_eq!(body, r#"{"productId":"p1"}"#);
    }

    #[test]
    fn test_cart_envelope_unwraps_nested_products() {
        let json = r#"{"cart": [{"productId": {"_id": "p1", "model_no": "VC-1"}}]}"#;
        let envelope: CartEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.cart.len(), 1);
        assert_eq!(envelope.cart[0].product.id.as_str(), "p1");
    }

    #[test]
    fn test_auth_response_with_rejection_only() {
        let json = r#"{"error": "User already exists"}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(resp.user.is_none());
        assert!(resp.access_token.is_none());
        assert_eq!(resp.error.as_deref(), Some("User already exists"));
    }

    #[test]
    fn test_auth_response_success_shape() {
        let json = r#"{
            "user": {"_id": "u1", "username": "asha", "email": "a@b.co"},
            "accessToken": "jwt-value",
            "message": "Login successful"
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(resp.user.is_some());
        assert_eq!(resp.access_token.as_deref(), Some("jwt-value"));
    }
}
