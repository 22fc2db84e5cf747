pub mod error;
pub mod flags;
pub mod parser;
pub mod record;
pub mod scanner;
