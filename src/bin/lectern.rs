// src/bin/lectern.rs
use std::process;

use clap::Parser;
use colored::Colorize;

use lectern_core::cli::{self, Cli};
use lectern_core::exit::LecternExit;

fn main() -> LecternExit {
    let cli = Cli::parse();
    match cli::execute(cli) {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            process::exit(1);
        }
    }
}
