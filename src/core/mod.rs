//! Core library components.
//!
//! Argument partitioning, authentication against Vault, concurrent secret
//! resolution and process launch.

pub mod args;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod env;
pub mod launcher;
pub mod metadata;
pub mod resolver;
pub mod types;
pub mod validation;
pub mod vault;
