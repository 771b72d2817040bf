//! Mapshare Storage - Low-level storage abstraction layer
//!
//! This crate provides the persistence layer for Mapshare, using redb as the
//! embedded database. It exposes byte-level APIs so that the typed models
//! and their snapshot format live in mapshare-core.
//!
//! # Tables
//!
//! - `app_state` - Logical state keys (`user`, `maps`, `userLikes`, `userSaves`)
//! - `system_config` - System configuration

pub mod config;
pub mod paths;
pub mod simple_storage;
pub mod state;
pub mod time_utils;

pub use config::{ConfigStorage, SystemConfig};
pub use simple_storage::SimpleStorage;
pub use state::{StateKey, StateStorage};
