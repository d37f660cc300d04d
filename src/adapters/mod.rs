//! Infrastructure adapters. Implement ports.
//!
//! Flow file, stats API, report export, terminal UI. Map errors to DomainError.

pub mod export;
pub mod persistence;
pub mod stats;
pub mod ui;
