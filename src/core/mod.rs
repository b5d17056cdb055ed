//! Core recipe logic — types, config, document codec, store, favorites.

pub mod config;
pub mod document;
pub mod favorites;
pub mod store;
pub mod types;
