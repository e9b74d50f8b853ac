//! Core types for the helpdesk.
//!
//! This module provides type-safe wrappers for the helpdesk entities.

pub mod id;

pub use id::*;
