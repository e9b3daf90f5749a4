//! # Blog Posting Core
//!
//! The domain layer of the blog posting service.
//! This crate holds the slug rules, the post lifecycle and the visibility
//! rules, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
