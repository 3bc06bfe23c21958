//! glossa-common: Shared error types used across all Glossa crates.

pub mod error;

pub use error::{ApiError, GlossaError, Result};
