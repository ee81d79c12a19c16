//! Catalog Models (dishes and drinks)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Dish category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DishType {
    Entrada,
    Principal,
    Postre,
}

impl DishType {
    pub const MEMBERS: &'static str = "ENTRADA, PRINCIPAL, POSTRE";

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ENTRADA" => Some(Self::Entrada),
            "PRINCIPAL" => Some(Self::Principal),
            "POSTRE" => Some(Self::Postre),
            _ => None,
        }
    }
}

/// Drink category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrinkType {
    Gaseosa,
    Natural,
    Cerveza,
}

impl DrinkType {
    pub const MEMBERS: &'static str = "GASEOSA, NATURAL, CERVEZA";

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "GASEOSA" => Some(Self::Gaseosa),
            "NATURAL" => Some(Self::Natural),
            "CERVEZA" => Some(Self::Cerveza),
            _ => None,
        }
    }
}

/// Which catalog table a product request addresses (`PLATO` / `BEBIDA`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Dish,
    Drink,
}

impl ProductKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PLATO" => Some(Self::Dish),
            "BEBIDA" => Some(Self::Drink),
            _ => None,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Dish => "dishes",
            Self::Drink => "drinks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dish => "Dish",
            Self::Drink => "Drink",
        }
    }
}

/// Dish entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url_img: Option<String>,
    pub price: f64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Drink entity
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Drink {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url_img: Option<String>,
    pub price: f64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub drink_type: DrinkType,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Create payload for POST /api/productos
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    /// `PLATO` or `BEBIDA`
    pub tipo: String,
    pub name: String,
    pub description: String,
    /// Category within the kind (dish type or drink type)
    #[serde(rename = "type")]
    pub category: String,
    pub price: f64,
    pub url_img: Option<String>,
}

/// Partial update payload for PUT /api/productos/{tipo}/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub price: Option<f64>,
    pub url_img: Option<String>,
    pub is_active: Option<bool>,
}
