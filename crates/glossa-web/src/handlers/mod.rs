//! HTTP handlers for all web routes.

pub mod index;
pub mod terms;
pub mod recommendations;
pub mod api;
pub mod system;
