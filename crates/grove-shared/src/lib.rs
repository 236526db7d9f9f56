//! # Grove Shared
//!
//! Wire-level types shared between the server and any front end.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
