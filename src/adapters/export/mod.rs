//! Export adapters. Serialize classified flows for reports.

pub mod csv_utils;

pub use csv_utils::summary_to_csv;
