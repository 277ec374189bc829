//! # Quill Shared
//!
//! Wire types shared between the server and its clients: request and
//! response DTOs, the error body shape, and the request-body decoding
//! policy.

pub mod body;
pub mod dto;
pub mod response;

pub use body::{DecodeError, decode_body};
pub use response::ErrorResponse;
