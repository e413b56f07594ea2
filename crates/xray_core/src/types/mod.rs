//! Core identifier and error types.
//!
//! This module provides:
//! - `shell`: The electron shell enumeration and its wire codes
//! - `error`: Structured error types for lookups, tables and dataset loading

pub mod error;
pub mod shell;

pub use error::{DatasetError, TableError, XrayError};
pub use shell::Shell;
