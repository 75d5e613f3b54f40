//! Request handlers, one module per resource.

pub mod activities;
pub mod activity_providers;
pub mod goals;
pub mod health;
pub mod iaps;
