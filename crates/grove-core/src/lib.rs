//! # Grove Core
//!
//! The domain layer of the Grove content platform.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod authz;
pub mod domain;
pub mod error;
pub mod page;
pub mod ports;
pub mod validate;

pub use error::DomainError;
