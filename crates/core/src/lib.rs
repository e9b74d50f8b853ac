//! Helpdesk Core - Shared types library.
//!
//! This crate provides common types used across the helpdesk components:
//! - `api` - REST façade over the helpdesk `MySQL` schema
//! - `cli` - Operator commands for the stored procedures
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding is opt-in via the `mysql` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
