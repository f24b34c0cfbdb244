//! Collaborator services sharing the key-value medium with the record store.
//!
//! # Responsibility
//! - Local account registration and authentication (`usuarios`).
//! - Session marker and access gate for front ends (`logado`).
//! - Theme preference (`theme`).

pub mod account_service;
pub mod session;
pub mod theme;
