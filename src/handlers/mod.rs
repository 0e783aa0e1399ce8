//! HTTP handlers

pub mod analyze;
pub mod auth;
pub mod health;
pub mod results;
pub mod synthetic;
pub mod upload;
