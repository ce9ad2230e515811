//! # Blogicum Core
//!
//! The domain layer of Blogicum: entities, the visibility policy, feed
//! queries, ownership checks and the application service built on top of
//! the repository ports. No infrastructure dependencies.

pub mod access;
pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod service;
pub mod viewer;
pub mod visibility;

pub use access::{Outcome, Route, Saved};
pub use error::DomainError;
pub use service::BlogService;
pub use viewer::Viewer;
