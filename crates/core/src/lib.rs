//! Core types and shared functionality for go2web.
//!
//! This crate provides:
//! - Content cache with on-disk and in-memory backends
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, ContentCache, DiskCache, MemoryCache, cache_key};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
