pub mod backup;
pub mod cli;
pub mod compile;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod latex;
pub mod layout;
pub mod links;
pub mod naming;
pub mod notebook;
pub mod reporting;
pub mod types;
