//! Court Booking Server
//!
//! Access control for the court booking API: bearer token authentication
//! and role based permission guards.

pub mod api;
pub mod auth;
pub mod config;
pub mod permissions;
