//! Database models
//!
//! Entity structs (`sqlx::FromRow`) plus the create/update payloads the
//! handlers deserialize. Status enums live in [`crate::workflow`].

pub mod dining_table;
pub mod order;
pub mod product;
pub mod reservation;
pub mod user;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use order::{
    LineItemInput, Order, OrderCreate, OrderDetail, OrderDetailView, OrderStatusUpdate, OrderView,
};
pub use product::{
    Dish, DishType, Drink, DrinkType, ProductCreate, ProductKind, ProductUpdate,
};
pub use reservation::{
    Reservation, ReservationCreate, ReservationUpdate, START_DATE_FORMAT,
};
pub use user::{ProfileResponse, ProfileUpdate, User, UserCreate, UserRole};
