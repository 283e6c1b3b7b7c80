//! Recipe matching service: which recipes can be cooked with what is in the
//! pantry right now?
//!
//! Pantry inventory, the recipe catalog and the ingredient dictionary are read
//! from their own services on every request; this crate scores each recipe by
//! ingredient coverage and returns the makeable ones, best first.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
