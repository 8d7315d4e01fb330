//! MES global search
//!
//! Relevance scoring over per-type candidate catalogs, result grouping for
//! presentation, and the HTTP surface and client that carry them.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod grouping;
pub mod metrics;
pub mod models;
pub mod search;

pub use error::{AppError, Result};
