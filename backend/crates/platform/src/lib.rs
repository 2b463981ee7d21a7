//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Input validation predicates (strings, emails, passwords, DECIMAL(10,2) numbers)
//! - Password hashing (Argon2id, constant-time verification)
//! - Encoding and signing helpers (Base64 data URIs, SHA-1 hex digests)

pub mod crypto;
pub mod password;
pub mod validation;
