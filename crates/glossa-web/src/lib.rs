//! glossa-web: HTTP surface of the Glossa glossary.
//!   - page-data endpoints (JSON context for each page)
//!   - admin-only read API under /api
//!   - related-term attachment endpoint
//!   - media files and health check

pub mod config;
pub mod auth;
pub mod router;
pub mod handlers;
pub mod state;
