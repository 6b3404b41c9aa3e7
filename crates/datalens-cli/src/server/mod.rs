//! JSON API server for the dashboard.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
