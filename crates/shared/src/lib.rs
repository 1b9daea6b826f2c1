//! Shared utilities and common types for the Up For Something backend.
//!
//! This crate provides functionality used across the other crates:
//! - JWT issuance and validation for caller identity
//! - Password hashing with Argon2id
//! - Reusable field validators for request payloads

pub mod jwt;
pub mod password;
pub mod validation;
