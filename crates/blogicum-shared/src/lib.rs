//! # Blogicum Shared
//!
//! Wire types of the Blogicum HTTP API: request forms, JSON page contexts
//! and RFC 7807 error bodies.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, RedirectResponse};
