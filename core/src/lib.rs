pub mod artifacts;
pub mod core;
pub mod error;
pub mod structs;

mod filesystem;
mod output;
mod utils;
