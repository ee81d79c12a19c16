//! Order Model
//!
//! An order owns its detail rows (cascade-deleted with the order).
//! `total` is always recomputed from the detail rows, never accumulated.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::workflow::OrderStatus;

/// Order row as stored
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    /// Unique order code (`ORD-xxxxxxxx`)
    pub code: String,
    pub user_id: Option<i64>,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: NaiveDateTime,
}

/// Order detail row (line item)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderDetail {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: Option<i64>,
    pub drink_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl OrderDetail {
    /// Derived, not stored
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Order with its details and owner email, as served to clients
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub code: String,
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub total: f64,
    pub created_at: NaiveDateTime,
    pub details: Vec<OrderDetailView>,
}

/// Line item view with the derived subtotal
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailView {
    pub id: i64,
    pub dish_id: Option<i64>,
    pub drink_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

impl From<OrderDetail> for OrderDetailView {
    fn from(d: OrderDetail) -> Self {
        let subtotal = d.subtotal();
        Self {
            id: d.id,
            dish_id: d.dish_id,
            drink_id: d.drink_id,
            product_name: d.product_name,
            quantity: d.quantity,
            unit_price: d.unit_price,
            subtotal,
        }
    }
}

/// Line item input for order creation
#[derive(Debug, Clone, Deserialize)]
pub struct LineItemInput {
    /// Catalog id (dish or drink depending on the list it appears in)
    pub id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Order creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub table_id: Option<i64>,
    #[serde(default)]
    pub dishes: Vec<LineItemInput>,
    #[serde(default)]
    pub drinks: Vec<LineItemInput>,
}

/// Status change payload for order update endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
