pub mod args;
pub mod commands;

pub use args::{Cli, Commands, TableChoice};
pub use commands::run;
