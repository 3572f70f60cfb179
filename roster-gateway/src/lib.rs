//! HTTP API gateway for the Roster user service.
//!
//! Exposes create, list, lookup and delete over an in-memory user store,
//! plus root and health endpoints.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod health;
pub mod routes;
pub mod store;
