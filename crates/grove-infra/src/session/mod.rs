//! Session resolver implementations.

mod memory;

pub use memory::InMemorySessionStore;
