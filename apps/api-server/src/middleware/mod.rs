//! Request middleware: session authentication and error mapping.

pub mod auth;
pub mod error;
