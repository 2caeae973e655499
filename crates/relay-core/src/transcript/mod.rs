//! Session transcript storage: the store port and its in-memory implementation.

pub mod memory;
pub mod store;
