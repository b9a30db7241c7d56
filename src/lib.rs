// src/lib.rs

//! dejaq Library
//!
//! Client glue for pushing content into an Amazon Q Business index: a JSON
//! profile store, an authenticated AWS session, and the two operations the
//! CLI exposes (document upload, crawler seed URL registration).

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod session;
pub mod utils;
