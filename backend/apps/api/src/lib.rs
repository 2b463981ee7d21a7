//! API server support
//!
//! Shared by the `api` server and the `seed-super-admin` bootstrap binary.

pub mod config;
