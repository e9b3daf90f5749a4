//! # Blog Posting Shared
//!
//! Request and response bodies of the HTTP API, their validation rules and
//! the error body. Kept free of server dependencies so clients can reuse it.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ErrorResponse, SuccessResponse};
pub use validation::{FieldErrors, Validate};
