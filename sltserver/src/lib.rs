#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod impls;

mod schedule;
pub use schedule::Scheduler;

mod sweep;
pub use sweep::sweep;

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;
