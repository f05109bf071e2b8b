// src/cli/mod.rs
pub mod args;
pub mod dispatch;
pub mod handlers;

pub use args::{Cli, Commands, LinkFormat};
pub use dispatch::execute;
