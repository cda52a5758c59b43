//! Command handlers

pub mod auth;
pub mod complaint;
pub mod dashboard;
pub mod export;
