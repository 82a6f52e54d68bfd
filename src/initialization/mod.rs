//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - logger (plain or JSON)
//! - HTTP clients for the plain and challenge strategies
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

pub use client::{init_challenge_client, init_redirect_client};
pub use logger::init_logger_with;
