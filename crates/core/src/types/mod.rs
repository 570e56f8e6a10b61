//! Core types for the loyalty card manager.
//!
//! This module provides type-safe wrappers for the client domain.

pub mod client;
pub mod id;
pub mod points;

pub use client::{Client, ClientUpdate, NewClient};
pub use id::{ClientId, ClientIdError};
pub use points::{LoyaltyPoints, LoyaltyPointsError};
