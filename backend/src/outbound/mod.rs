//! Driven adapters: stores, token signing, password hashing and blob storage.
//!
//! `memory` backs every store port with process-local maps for development
//! and tests; `persistence` is the PostgreSQL equivalent.

pub mod auth;
pub mod blob;
pub mod memory;
pub mod persistence;
