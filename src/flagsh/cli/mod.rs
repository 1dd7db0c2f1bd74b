mod commands;
mod print;
mod setup;
mod terminal;

pub use commands::run;
