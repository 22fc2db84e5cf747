pub mod error;
mod fixup;
mod header;
pub mod index;
pub mod resolver;
