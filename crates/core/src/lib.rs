//! Loyalty Core - Shared domain types for the loyalty card manager.
//!
//! This crate provides the types and rules used by every component:
//! - `web` - HTTP server (JSON API and server-rendered pages)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Database encoding for [`ClientId`] is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Client record, identifiers and loyalty points
//! - [`search`] - Free-text filtering of a client list
//! - [`form`] - Validation rules for the add and edit forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod form;
pub mod search;
pub mod types;

pub use form::{ClientForm, FormErrors, ValidClientForm};
pub use search::{filter_clients, matches_query};
pub use types::*;
