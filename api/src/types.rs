//! Wire types shared by the backend and the state containers
//!
//! Field names follow the backend's JSON (`_id`, `type`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ingredient category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientType {
    /// Top and bottom of the burger
    Bun,
    /// Sauce filling
    Sauce,
    /// Main filling
    Main,
}

impl std::fmt::Display for IngredientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bun => "bun",
            Self::Sauce => "sauce",
            Self::Main => "main",
        };
        f.write_str(name)
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog id
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    #[serde(rename = "type")]
    pub kind: IngredientType,
    /// Proteins per 100 g
    pub proteins: u32,
    /// Fat per 100 g
    pub fat: u32,
    /// Carbohydrates per 100 g
    pub carbohydrates: u32,
    /// Calories per 100 g
    pub calories: u32,
    /// Price in space credits
    pub price: u32,
    /// Default image URL
    pub image: String,
    /// Small image URL
    pub image_mobile: String,
    /// Large image URL
    pub image_large: String,
}

/// Order status reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being prepared
    Pending,
    /// Ready
    Done,
    /// Accepted, not yet started
    Created,
}

/// A submitted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server id
    #[serde(rename = "_id")]
    pub id: String,
    /// Catalog ids, repeats allowed
    pub ingredients: Vec<String>,
    /// Current status
    pub status: OrderStatus,
    /// Generated burger name
    pub name: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
    /// Sequential display number
    pub number: u64,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
}

/// Body returned by `auth/login` and `auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Short-lived bearer credential, already prefixed with `Bearer `
    pub access_token: String,
    /// Long-lived credential exchanged at `auth/token`
    pub refresh_token: String,
    /// The authenticated user
    pub user: User,
}

/// Body returned by `auth/token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token
    pub access_token: String,
    /// New refresh token; the previous one is invalidated
    pub refresh_token: String,
}

/// Body returned by `orders/all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    /// Most recent orders
    pub orders: Vec<Order>,
    /// Orders ever placed
    pub total: u64,
    /// Orders placed today
    pub total_today: u64,
}

/// Credentials for `auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
}

/// Account details for `auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterData {
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Password
    pub password: String,
}

/// Partial profile update for `PATCH auth/user`; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// New password plus the code from the reset email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    /// New password
    pub password: String,
    /// Code from the reset email
    pub token: String,
}

// Envelopes the endpoint functions unwrap before returning.

#[derive(Debug, Deserialize)]
pub(crate) struct IngredientsEnvelope {
    pub data: Vec<Ingredient>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope {
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewOrderEnvelope {
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

/// Envelope for endpoints whose payload is only the `success` flag
#[derive(Debug, Deserialize)]
pub(crate) struct Acknowledgement {}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_uses_backend_field_names() {
        let json = serde_json::json!({
            "_id": "643d69a5c3f7b9001cfa093c",
            "name": "Краторная булка N-200i",
            "type": "bun",
            "proteins": 80,
            "fat": 24,
            "carbohydrates": 53,
            "calories": 420,
            "price": 1255,
            "image": "https://code.s3.yandex.net/react/code/bun-02.png",
            "image_mobile": "https://code.s3.yandex.net/react/code/bun-02-mobile.png",
            "image_large": "https://code.s3.yandex.net/react/code/bun-02-large.png",
            "__v": 0
        });

        let ingredient: Ingredient = serde_json::from_value(json).unwrap();

        assert_eq!(ingredient.id, "643d69a5c3f7b9001cfa093c");
        assert_eq!(ingredient.kind, IngredientType::Bun);
        assert_eq!(ingredient.price, 1255);
    }

    #[test]
    fn test_order_parses_timestamps() {
        let json = serde_json::json!({
            "_id": "6820895fe8e61d001cec7e38",
            "ingredients": ["643d69a5c3f7b9001cfa093c", "643d69a5c3f7b9001cfa0941"],
            "status": "done",
            "name": "Краторный био-марсианский бургер",
            "createdAt": "2025-05-11T13:12:51.630Z",
            "updatedAt": "2025-05-11T13:12:52.372Z",
            "number": 76798
        });

        let order: Order = serde_json::from_value(json).unwrap();

        assert_eq!(order.number, 76798);
        assert_eq!(order.status, OrderStatus::Done);
        assert!(order.created_at < order.updated_at);
    }

    #[test]
    fn test_user_update_skips_absent_fields() {
        let update = UserUpdate {
            name: Some("Yuri".to_string()),
            ..UserUpdate::default()
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "name": "Yuri" })
        );
    }
}
