//! One method per REST endpoint
//!
//! Each method builds the path and options, calls the client, and unwraps
//! the envelope (`.data`, `.order`, `.orders[0]`, `.user`). Authenticated
//! endpoints send the current access token and go through
//! [`ApiClient::fetch_with_refresh`].

use crate::{
    client::{ApiClient, RequestOptions},
    error::ApiError,
    types::{
        Acknowledgement, AuthResponse, FeedResponse, Ingredient, IngredientsEnvelope, LoginData,
        NewOrderEnvelope, Order, OrdersEnvelope, PasswordReset, RegisterData, User, UserEnvelope,
        UserUpdate,
    },
};
use std::future::Future;

/// The backend, as seen by the state containers
///
/// [`ApiClient`] talks to the real server; tests substitute a mock.
pub trait BurgerApi: Send + Sync {
    /// `GET ingredients`: the full catalog
    fn ingredients(&self) -> impl Future<Output = Result<Vec<Ingredient>, ApiError>> + Send;

    /// `GET orders/all`: the public feed with totals
    fn feeds(&self) -> impl Future<Output = Result<FeedResponse, ApiError>> + Send;

    /// `GET orders` (authenticated): the signed-in user's history
    fn orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `POST orders` (authenticated): submit catalog ids, returns the created order
    fn order_burger(
        &self,
        ingredients: Vec<String>,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;

    /// `GET orders/{number}`: a single order
    fn order_by_number(&self, number: u64) -> impl Future<Output = Result<Order, ApiError>> + Send;

    /// `POST auth/register`
    fn register(
        &self,
        data: RegisterData,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    /// `POST auth/login`
    fn login(&self, data: LoginData) -> impl Future<Output = Result<AuthResponse, ApiError>> + Send;

    /// `POST auth/logout` with the stored refresh token in the body
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST password-reset`: request the reset email
    fn forgot_password(&self, email: String) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST password-reset/reset`: apply the new password
    fn reset_password(
        &self,
        reset: PasswordReset,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET auth/user` (authenticated)
    fn get_user(&self) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// `PATCH auth/user` (authenticated)
    fn update_user(&self, update: UserUpdate)
        -> impl Future<Output = Result<User, ApiError>> + Send;
}

impl BurgerApi for ApiClient {
    async fn ingredients(&self) -> Result<Vec<Ingredient>, ApiError> {
        let envelope: IngredientsEnvelope =
            self.request("ingredients", &RequestOptions::get()).await?;
        Ok(envelope.data)
    }

    async fn feeds(&self) -> Result<FeedResponse, ApiError> {
        self.request("orders/all", &RequestOptions::get()).await
    }

    async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let options = RequestOptions::get().with_authorization(self.current_authorization());
        let envelope: OrdersEnvelope = self.fetch_with_refresh("orders", options).await?;
        Ok(envelope.orders)
    }

    async fn order_burger(&self, ingredients: Vec<String>) -> Result<Order, ApiError> {
        let options = RequestOptions::post(serde_json::json!({ "ingredients": ingredients }))
            .with_authorization(self.current_authorization());
        let envelope: NewOrderEnvelope = self.fetch_with_refresh("orders", options).await?;
        Ok(envelope.order)
    }

    async fn order_by_number(&self, number: u64) -> Result<Order, ApiError> {
        let envelope: OrdersEnvelope = self
            .request(&format!("orders/{number}"), &RequestOptions::get())
            .await?;
        envelope
            .orders
            .into_iter()
            .next()
            .ok_or(ApiError::OrderNotFound(number))
    }

    async fn register(&self, data: RegisterData) -> Result<AuthResponse, ApiError> {
        self.request("auth/register", &RequestOptions::post(serde_json::to_value(data)?))
            .await
    }

    async fn login(&self, data: LoginData) -> Result<AuthResponse, ApiError> {
        self.request("auth/login", &RequestOptions::post(serde_json::to_value(data)?))
            .await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let token = self.tokens().refresh_token();
        let _: Acknowledgement = self
            .request(
                "auth/logout",
                &RequestOptions::post(serde_json::json!({ "token": token })),
            )
            .await?;
        Ok(())
    }

    async fn forgot_password(&self, email: String) -> Result<(), ApiError> {
        let _: Acknowledgement = self
            .request(
                "password-reset",
                &RequestOptions::post(serde_json::json!({ "email": email })),
            )
            .await?;
        Ok(())
    }

    async fn reset_password(&self, reset: PasswordReset) -> Result<(), ApiError> {
        let _: Acknowledgement = self
            .request(
                "password-reset/reset",
                &RequestOptions::post(serde_json::to_value(reset)?),
            )
            .await?;
        Ok(())
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        let options = RequestOptions::get().with_authorization(self.current_authorization());
        let envelope: UserEnvelope = self.fetch_with_refresh("auth/user", options).await?;
        Ok(envelope.user)
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, ApiError> {
        let options = RequestOptions::patch(serde_json::to_value(update)?)
            .with_authorization(self.current_authorization());
        let envelope: UserEnvelope = self.fetch_with_refresh("auth/user", options).await?;
        Ok(envelope.user)
    }
}
