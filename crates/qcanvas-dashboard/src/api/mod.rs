//! API endpoint handlers.

pub mod algorithm;
pub mod circuits;
pub mod health;
