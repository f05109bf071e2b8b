// src/reporting/mod.rs
pub mod console;

pub use console::{print_coverage, print_report};
