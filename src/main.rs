// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod catalog;
mod cmd;
mod config;
mod graph;
mod server;
mod ui;

use clap::Parser;
use cmd::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
