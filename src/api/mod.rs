//! API Module
//!
//! One submodule per resource, each exposing a `router()` merged by
//! [`crate::core::build_app`]. Role requirements are layered per route;
//! the public route table lives in [`crate::auth::middleware`].

pub mod auth;
pub mod contact;
pub mod health;
pub mod kitchen;
pub mod orders;
pub mod products;
pub mod reservations;
pub mod tables;
pub mod users;
