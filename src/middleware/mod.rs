//! Middleware module for Parley HTTP server
//!
//! Provides:
//! - Login sessions and the static credential table
//! - The `RequireSession` extractor guarding the chat and trace endpoints

pub mod auth;
pub mod session;
