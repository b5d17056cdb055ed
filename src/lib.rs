//! Foodie — a local recipe box.
//!
//! User-authored recipes live in one JSON document under a single storage
//! key; favorites are a separate set keyed by recipe id. Every mutation
//! rewrites the whole document and is journaled with a BLAKE3 digest.

pub mod cli;
pub mod core;
pub mod journal;
pub mod logging;
pub mod storage;
