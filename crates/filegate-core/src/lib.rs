//! # filegate Core
//!
//! Shared, runtime-agnostic logic for filegate: file and API-key models, the
//! error taxonomy, the authorization guard, pagination arithmetic, and the
//! metadata/search store abstractions.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. Backends (SQLite, IPFS, local disk) live in the
//! `filegate` application crate.

pub mod auth;
pub mod error;
pub mod models;
pub mod page;
pub mod store;

pub use error::GatewayError;
