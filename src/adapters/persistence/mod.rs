//! Persistence adapters. File-backed flow source.

pub mod json_flows;

pub use json_flows::JsonFlowSource;
