//! HTTP calculation service for X-ray physics lookups
//!
//! This crate exposes the `xray_core` lookups (absorption edge energy, total
//! cross section, atomic weight) as a small JSON-over-HTTP API for a browser
//! front end:
//!
//! - `GET /health`
//! - `POST /edge_energy` with `{"Z": <int>, "shell": <int>}`
//! - `POST /cs_total` with `{"Z": <int>, "energy": <float>}`
//! - `POST /atomic_weight` with `{"Z": <int>}`
//!
//! Every request is computed independently; failures come back as
//! `{"error": "<message>"}` with HTTP 400.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use xray_core;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
